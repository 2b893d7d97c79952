//! Calculatrice scientifique — noyau d'évaluation.
//!
//! Entrée : une chaîne brute (avec sucre notationnel : %, !, ^,
//! multiplication implicite, ANS, glyphes × ÷ − π) et un [`Mode`]
//! (unité d'angle + réponse précédente). Sortie : un [`Affichage`]
//! (texte décimal à 12 chiffres significatifs, et quand elles existent
//! dans les bornes, fraction exacte + forme décimale périodique).
//!
//! ```
//! use calculatrice_sci::{eval_expression, Mode};
//!
//! let a = eval_expression("1/3", &Mode::default()).unwrap();
//! assert_eq!(a.texte_decimal, "0.333333333333");
//! assert_eq!(a.periodique.as_deref(), Some("0.(3)"));
//! ```
//!
//! Le noyau est pur : aucun état entre deux appels. La réponse
//! précédente (ANS) appartient à l'appelant, qui la re-fournit via le
//! mode à chaque évaluation.

pub mod noyau;

pub use noyau::{eval_expression, Affichage, ErreurEval, Fraction, Mode, UniteAngle};
