// src/noyau/format.rs
//
// Construction du résultat affichable : texte décimal (12 chiffres
// significatifs), fraction exacte optionnelle et rendu périodique
// optionnel. C'est ici que « meilleure approximation bornée » devient
// « forme exacte ou rien » : la fraction n'est retenue que si elle
// reproduit la valeur à la tolérance près.

use super::lecture::{texte_periodique, vers_fraction, Fraction, TOLERANCE};

/// Résultat prêt à afficher — seul artefact exposé à l'appelant.
#[derive(Clone, Debug, PartialEq)]
pub struct Affichage {
    /// Valeur numérique brute (non arrondie). L'appelant s'en sert pour
    /// alimenter ANS au prochain appel.
    pub valeur: f64,
    /// Texte décimal : entier tel quel, sinon 12 chiffres significatifs.
    pub texte_decimal: String,
    /// Fraction exacte (dénominateur borné), absente sinon.
    pub fraction: Option<Fraction>,
    /// Rendu périodique de la fraction ("0.(3)"), absent avec elle.
    pub periodique: Option<String>,
}

/// Construit l'affichage d'une valeur FINIE (garanti par le pipeline).
pub fn affichage(valeur: f64) -> Affichage {
    // entier : texte direct, pas de formes alternatives
    if valeur.fract() == 0.0 {
        return Affichage {
            valeur,
            texte_decimal: format!("{valeur}"),
            fraction: None,
            periodique: None,
        };
    }

    let texte_decimal = arrondi_12_chiffres(valeur);

    // fraction tentée sur la valeur NON arrondie, exactitude revérifiée
    let fraction = vers_fraction(valeur).filter(|f| {
        let approx = *f.numer() as f64 / *f.denom() as f64;
        (approx - valeur).abs() <= TOLERANCE
    });
    let periodique = fraction.as_ref().map(texte_periodique);

    Affichage {
        valeur,
        texte_decimal,
        fraction,
        periodique,
    }
}

/// Arrondi à 12 chiffres significatifs, zéros de queue retirés
/// (équivalent de parseFloat(x.toPrecision(12)).toString()).
fn arrondi_12_chiffres(x: f64) -> String {
    let s = format!("{x:.11e}");
    let arrondi: f64 = s.parse().unwrap_or(x);
    format!("{arrondi}")
}
