// src/noyau/canon.rs
//
// Normalisation : chaîne brute -> forme canonique évaluable.
//
// La forme canonique ne contient plus que :
// - opérateurs + - * / ^
// - littéraux numériques, parenthèses, virgules
// - noms de fonctions de la liste blanche (voir expr.rs)
//
// L'ordre des réécritures est FIXE : les règles tardives supposent la
// sortie des règles précédentes (ex : le %-littéral doit être désucré
// avant l'insertion de la multiplication implicite).

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use super::eval::{Mode, UniteAngle};

/* ------------------------ Réécritures compilées ------------------------ */

// 12% ou 12.5% -> (12/100), (12.5/100)
static RE_POURCENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(\.\d+)?)%").expect("regex pourcent"));

// ANS en mot entier, sensible à la casse
static RE_ANS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bANS\b").expect("regex ANS"));

// 5! ou (1+2)! -> fact(5), fact((1+2))
// NOTE : groupe parenthésé NON imbriqué seulement. `((1+2))!` reste tel
// quel et échouera à l'évaluation (comportement volontairement non étendu).
static RE_FACTORIELLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9.]+|\([^()]*\))!").expect("regex factorielle"));

// Multiplication implicite : 2( , )2 , )(
static RE_IMPL_NUM_PAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d)\s*\(").expect("regex 2("));
static RE_IMPL_PAR_NUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\)\s*(\d)").expect("regex )2"));
static RE_IMPL_PAR_PAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\)\s*\(").expect("regex )("));

// Mode degrés : sin( -> sind( etc. Les variantes suffixées `d` font
// partie de la liste blanche canonique (conversion d'angle intégrée).
static RE_TRIG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(sin|cos|tan|asin|acos|atan)\s*\(").expect("regex trig"));

/* ------------------------ Normalisation ------------------------ */

/// Normalise une expression brute en forme canonique.
///
/// Fonction pure et totale : une entrée malformée produit une sortie
/// malformée, rejetée plus loin par le tokenizer ou l'évaluateur.
pub fn normaliser(brut: &str, mode: &Mode) -> String {
    let mut s = brut.trim().to_string();

    // 1) glyphe π -> pi
    s = s.replace('π', "pi");

    // 2) glyphes localisés × ÷ − et le deux-points comme division
    s = s.replace('×', "*").replace('÷', "/").replace('−', "-");
    s = s.replace(':', "/");

    // 3) opérateur puissance canonique : `^` (l'orthographe `**` est
    //    acceptée en entrée et repliée)
    s = s.replace("**", "^");

    // 4) pourcentage littéral : 12% -> (12/100)
    s = RE_POURCENT.replace_all(&s, "($1/100)").into_owned();

    // 5) ANS -> valeur précédente, parenthésée (protège un ANS négatif)
    let ans = match mode.reponse_precedente {
        Some(v) => format!("({v})"),
        None => "(0)".to_string(),
    };
    s = RE_ANS.replace_all(&s, NoExpand(&ans)).into_owned();

    // 6) factorielle suffixe -> fact(...)
    s = RE_FACTORIELLE.replace_all(&s, "fact($1)").into_owned();

    // 7) multiplication implicite
    s = RE_IMPL_NUM_PAR.replace_all(&s, "$1*(").into_owned();
    s = RE_IMPL_PAR_NUM.replace_all(&s, ")*$1").into_owned();
    s = RE_IMPL_PAR_PAR.replace_all(&s, ")*(").into_owned();

    // 8) mode degrés : bascule vers les variantes en degrés.
    //    `sind(` déjà présent ne re-matche pas (le `\(` suit directement).
    if mode.unite_angle == UniteAngle::Degres {
        s = RE_TRIG.replace_all(&s, "${1}d(").into_owned();
    }

    s
}

/* ------------------------ Tests ------------------------ */
