//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> tokenize -> RPN -> Expr -> eval -> garde-fous -> Affichage
//!
//! Politique d'erreur : tous les échecs internes (syntaxe, identifiant
//! inconnu, valeur non finie) sont rabattus ICI sur l'erreur opaque
//! `ErreurEval`. La cause détaillée part au journal (debug), jamais vers
//! l'appelant — il possède déjà la chaîne brute, rien n'est renvoyé.

use thiserror::Error;

use super::canon::normaliser;
use super::format::{affichage, Affichage};
use super::jetons::{format_tokens, tokenize};
use super::rpn::{from_rpn, to_rpn};

/// Échec d'évaluation, volontairement opaque (une seule sorte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expression invalide ou calcul impossible")]
pub struct ErreurEval;

/// Unité d'angle des fonctions trigonométriques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UniteAngle {
    #[default]
    Radians,
    Degres,
}

/// Contexte d'une évaluation, fourni par l'appelant à chaque appel.
/// Le noyau ne le mute jamais : `reponse_precedente` est l'affaire de
/// l'appelant (il la re-fournit au prochain appel).
#[derive(Debug, Clone, Copy, Default)]
pub struct Mode {
    pub unite_angle: UniteAngle,
    pub reponse_precedente: Option<f64>,
}

/// API publique : normalise, évalue et met en forme une expression brute.
///
/// `Ok(Affichage)` : texte décimal + formes exactes optionnelles.
/// `Err(ErreurEval)` : échec opaque, cause au journal seulement.
pub fn eval_expression(brut: &str, mode: &Mode) -> Result<Affichage, ErreurEval> {
    match pipeline(brut, mode) {
        Ok(a) => Ok(a),
        Err(cause) => {
            tracing::debug!(%cause, "évaluation échouée");
            Err(ErreurEval)
        }
    }
}

fn pipeline(brut: &str, mode: &Mode) -> Result<Affichage, String> {
    let s = brut.trim();
    if s.is_empty() {
        return Err("entrée vide".into());
    }

    // 1) Normalisation (pure, totale)
    let canonique = normaliser(s, mode);
    tracing::trace!(%canonique, "forme canonique");

    // 2) Valeur numérique
    let valeur = evaluer_canonique(&canonique)?;

    // 3) Mise en forme
    Ok(affichage(valeur))
}

/// Évalue une forme canonique en f64 : jetons -> RPN -> Expr -> eval,
/// puis garde-fous numériques (fini, -0 -> 0).
pub(crate) fn evaluer_canonique(canonique: &str) -> Result<f64, String> {
    let jetons = tokenize(canonique)?;

    let rpn = to_rpn(&jetons)?;
    tracing::trace!(rpn = %format_tokens(&rpn), "notation polonaise inversée");

    let expr = from_rpn(&rpn)?;

    let mut valeur = expr.eval()?;
    if !valeur.is_finite() {
        return Err("résultat non fini".into());
    }
    if valeur == 0.0 {
        // -0 normalisé en 0
        valeur = 0.0;
    }
    Ok(valeur)
}
