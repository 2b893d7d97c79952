//! Noyau de la calculatrice scientifique
//!
//! Organisation interne :
//! - canon.rs   : normalisation (brut -> forme canonique)
//! - jetons.rs  : tokenisation de la forme canonique
//! - rpn.rs     : shunting-yard + construction Expr
//! - expr.rs    : AST + liste blanche de fonctions + évaluation f64
//! - lecture.rs : fraction continue + développement décimal périodique
//! - format.rs  : résultat affichable (décimal, fraction, périodique)
//! - eval.rs    : pipeline complet + erreur opaque

pub mod canon;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use eval::{eval_expression, ErreurEval, Mode, UniteAngle};
pub use format::Affichage;
pub use lecture::{vers_fraction, Developpement, Fraction};
