// src/noyau/jetons.rs

/// Jeton de la forme canonique.
///
/// NOTE : `Appel` n'est jamais produit par `tokenize` ; il n'apparaît
/// qu'en sortie de la RPN (rpn.rs), une fois l'arité d'un appel connue.
#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes (tout ce qui n'est pas opérateur / nombre).
    // NOTE : c'est la RPN qui décide si c'est une fonction (fact/sin/...)
    // ou une constante (pi, e).
    Ident(String),

    // Appel de fonction résolu : nom + nombre d'arguments réellement passés
    Appel(String, usize),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
    Virgule,

    LPar,
    RPar,
}

/// Tokenize une forme canonique en jetons.
/// Supporte :
/// - nombres décimaux (ex : 12, 12.5) avec exposant optionnel (ex : 2e3, 1.5e-7)
/// - opérateurs + - * / ^
/// - virgule (séparateur d'arguments : nCr(5,2))
/// - parenthèses ( )
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            out.push(Tok::Ident(word.to_lowercase()));
            continue;
        }

        // Nombre : chiffres, partie décimale optionnelle, exposant optionnel
        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            // partie décimale : '.' suivi d'au moins un chiffre
            if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            // exposant : e / E, signe optionnel, au moins un chiffre.
            // On ne consomme le 'e' QUE si un chiffre suit : "2e" reste
            // Num(2) + Ident(e) (constante d'Euler).
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let lit: String = chars[start..i].iter().collect();
            let v: f64 = lit.parse().map_err(|_| format!("nombre invalide: {lit:?}"))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),
            Tok::Appel(name, n) => format!("{name}@{n}"),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Virgule => ",".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
