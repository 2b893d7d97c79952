// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est dans la liste blanche des fonctions => empilé comme
//      opérateur "collé" à sa parenthèse d'arguments ; il ressort en
//      Appel(name, arité) après la parenthèse fermante
//    - sinon => constante (pi, e) ou identifiant inconnu (rejeté au parse)
// - Virgule : sépare les arguments ; un compteur par niveau de parenthèse
//   donne l'arité réelle de l'appel
// - Moins unaire:
//    - si '-' arrive quand on n'attend PAS une valeur, on injecte 0 :
//      "-x" => "0 x -"

use super::expr::{Arite, Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("ncr"), LPar, Num(5), Virgule, Num(2), RPar]
///   rpn:    [Num(5), Num(2), Appel("ncr", 2)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // un compteur de virgules par niveau de parenthèse ouvert
    let mut virgules: Vec<usize> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et les arguments vides.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if Fonction::depuis_nom(&name).is_some() {
                    // fonction : sur la pile, elle sortira en Appel après ')'
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    // constante (pi, e) ou inconnu : sortie directe,
                    // le parse RPN->Expr tranchera
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                virgules.push(0);
                prev_was_value = false;
            }

            Tok::Virgule => {
                if !prev_was_value {
                    return Err("virgule sans argument à sa gauche".into());
                }
                // dépile jusqu'à '(' (sans la retirer)
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    out.push(ops.pop().unwrap());
                }
                match virgules.last_mut() {
                    Some(n) => *n += 1,
                    None => return Err("virgule hors parenthèses".into()),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err("parenthèse fermante sans valeur".into());
                }

                // dépile jusqu'à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err("parenthèse fermante orpheline".into());
                }

                let nb_virgules = virgules.pop().unwrap_or(0);

                // si une fonction est au sommet, l'appel est résolu ici
                if ops.last().is_some_and(is_fonction) {
                    let name = match ops.pop() {
                        Some(Tok::Ident(n)) => n,
                        _ => unreachable!("is_fonction garantit un Ident"),
                    };
                    out.push(Tok::Appel(name, nb_virgules + 1));
                } else if nb_virgules > 0 {
                    return Err("virgule hors d'un appel de fonction".into());
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (collée à ses arguments)
                // - et la précédence/associativité exige de sortir le sommet
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                if !prev_was_value {
                    // moins unaire : injecte 0 et reste collé à son opérande
                    // (surtout ne pas dépiler : "2*-3" doit rester 2*(0-3))
                    out.push(Tok::Num(0.0));
                } else {
                    while let Some(top) = ops.last() {
                        if matches!(top, Tok::LPar) || is_fonction(top) {
                            break;
                        }
                        if precedence(top) >= precedence(&Tok::Minus) {
                            out.push(ops.pop().unwrap());
                        } else {
                            break;
                        }
                    }
                }

                ops.push(Tok::Minus);
                prev_was_value = false;
            }

            Tok::Appel(_, _) => return Err("jeton d'appel inattendu en entrée".into()),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d'une RPN.
///
/// - Ident(name) : constante (pi, e) ou erreur (espace de noms fermé)
/// - Appel(name, argc) : fonction de la liste blanche, arité vérifiée
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    use super::expr::constante;

    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),

            Tok::Ident(name) => {
                if let Some(v) = constante(&name) {
                    st.push(Expr::Nombre(v));
                } else if Fonction::depuis_nom(&name).is_some() {
                    return Err(format!("fonction sans parenthèses: {name}"));
                } else {
                    return Err(format!("identifiant inconnu: {name}"));
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or("expression invalide")?;
                let a = st.pop().ok_or("expression invalide")?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => unreachable!(),
                };

                st.push(e);
            }

            Tok::Appel(name, argc) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| format!("identifiant inconnu: {name}"))?;

                let arite_ok = match f.arite() {
                    Arite::Unaire => argc == 1,
                    Arite::Binaire => argc == 2,
                    Arite::Variadique => argc >= 1,
                };
                if !arite_ok {
                    return Err(format!("arité invalide pour {name}: {argc} argument(s)"));
                }

                if st.len() < argc {
                    return Err("fonction sans argument".into());
                }
                let args = st.split_off(st.len() - argc);
                st.push(Expr::Appel(f, args));
            }

            Tok::Virgule | Tok::LPar | Tok::RPar => {
                return Err("jeton inattendu en RPN".into());
            }
        }
    }

    if st.len() != 1 {
        return Err("expression invalide".into());
    }
    Ok(st.pop().unwrap())
}
