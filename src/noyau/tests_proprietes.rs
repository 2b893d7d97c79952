//! Propriétés (proptest) : lois de la reconstruction rationnelle,
//! stabilité de la normalisation, robustesse du pipeline.
//!
//! But : marteler le noyau sans brûler la machine — les entrées sont
//! bornées (dénominateurs <= 10000, chaînes courtes) et chaque cas
//! termine par construction (budgets de chiffres et d'itérations).

use proptest::prelude::*;

use super::canon::normaliser;
use super::eval::{eval_expression, Mode};
use super::format::affichage;
use super::lecture::{developpement, vers_fraction, Fraction, CHIFFRES_MAX};

proptest! {
    /// Pour tout entier n : toFraction(n) = n/1.
    #[test]
    fn loi_des_entiers(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(vers_fraction(n as f64), Some(Fraction::from_integer(n)));
    }

    /// Aller-retour : p/q (q <= 10000) passé en flottant est retrouvé
    /// sous forme réduite.
    #[test]
    fn loi_aller_retour(num in -10_000i64..10_000, den in 1i64..=10_000) {
        let attendu = Fraction::new(num, den); // réduite par construction
        let x = num as f64 / den as f64;
        prop_assert_eq!(vers_fraction(x), Some(attendu));
    }

    /// Un dénominateur 2^a * 5^b termine toujours (période vide).
    #[test]
    fn denominateurs_2_5_terminent(num in 1i64..1000, a in 0u32..6, b in 0u32..6) {
        let den = 2i64.pow(a) * 5i64.pow(b);
        let d = developpement(num, den, CHIFFRES_MAX);
        prop_assert!(d.periodique.is_empty());
    }

    /// La normalisation est un point fixe après une passe, pour tout
    /// texte sans glyphe réécrit (ni !, ni %, ni ANS, ni **).
    #[test]
    fn normalisation_point_fixe(s in "[0-9+*/^(), a-z.]{0,24}") {
        let mode = Mode::default();
        let une_passe = normaliser(&s, &mode);
        prop_assert_eq!(normaliser(&une_passe, &mode), une_passe.clone());
    }

    /// Le pipeline ne panique jamais : Ok ou Err, rien d'autre.
    #[test]
    fn pipeline_sans_panique(s in "\\PC{0,32}") {
        let _ = eval_expression(&s, &Mode::default());
    }

    /// Le texte décimal re-parsé reste à 12 chiffres de la valeur.
    #[test]
    fn texte_decimal_fidele(num in -10_000i64..10_000, den in 1i64..=10_000) {
        let x = num as f64 / den as f64;
        let a = affichage(x);
        let relu: f64 = a.texte_decimal.parse().expect("texte re-parsable");
        prop_assert!((relu - x).abs() <= 1e-11 * x.abs().max(1.0));
    }
}
