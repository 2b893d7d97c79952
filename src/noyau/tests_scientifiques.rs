//! Tests scientifiques : le comportement observable du noyau, de bout
//! en bout (normalisation -> évaluation -> mise en forme).
//!
//! Regroupés par thème : sucre notationnel, bibliothèque de fonctions,
//! modes d'angle, reconstruction rationnelle, affichage.

use super::canon::normaliser;
use super::eval::{eval_expression, evaluer_canonique, Mode, UniteAngle};
use super::lecture::{vers_fraction, Fraction};

/* ------------------------ Helpers ------------------------ */

fn mode_deg() -> Mode {
    Mode {
        unite_angle: UniteAngle::Degres,
        reponse_precedente: None,
    }
}

/// normalize + evaluate, mode radians par défaut.
fn val(s: &str) -> f64 {
    val_mode(s, &Mode::default())
}

fn val_deg(s: &str) -> f64 {
    val_mode(s, &mode_deg())
}

fn val_mode(s: &str, mode: &Mode) -> f64 {
    let canonique = normaliser(s, mode);
    evaluer_canonique(&canonique)
        .unwrap_or_else(|e| panic!("évaluation de {s:?} (canonique {canonique:?}) : {e}"))
}

fn approx(obtenu: f64, attendu: f64) {
    assert!(
        (obtenu - attendu).abs() < 1e-9,
        "attendu {attendu}, obtenu {obtenu}"
    );
}

/* ------------------------ Sucre notationnel ------------------------ */

#[test]
fn multiplication_implicite() {
    approx(val("2(3+1)"), 8.0);
    approx(val("(3+1)2"), 8.0);
    approx(val("(1+1)(2+2)"), 8.0);
}

#[test]
fn factorielle_suffixe() {
    approx(val("5!"), 120.0);
    approx(val("0!"), 1.0);
    approx(val("(1+2)!"), 6.0);
    approx(val("3!+1"), 7.0);
    approx(val("3!2"), 12.0); // fact(3) puis )2 -> )*2
}

#[test]
fn pourcentage() {
    approx(val("50%"), 0.5);
    approx(val("50%+50%"), 1.0);
    approx(val("12.5%*8"), 1.0);
}

#[test]
fn glyphes() {
    approx(val("6×7"), 42.0);
    approx(val("8÷2"), 4.0);
    approx(val("9−4"), 5.0);
    approx(val("10:4"), 2.5);
    approx(val("π"), std::f64::consts::PI);
}

#[test]
fn puissances() {
    approx(val("2^10"), 1024.0);
    approx(val("2**10"), 1024.0);
    approx(val("9^0.5"), 3.0);
}

#[test]
fn ans() {
    let mode = Mode {
        reponse_precedente: Some(-3.0),
        ..Mode::default()
    };
    approx(val_mode("ANS^2", &mode), 9.0);
    // sans réponse précédente : 0
    approx(val("ANS"), 0.0);
}

/* ------------------------ Bibliothèque de fonctions ------------------------ */

#[test]
fn combinatoire() {
    approx(val("nCr(5,2)"), 10.0);
    approx(val("nCr(2,5)"), 0.0);
    approx(val("nPr(5,2)"), 20.0);
    approx(val("nPr(5,0)"), 1.0);
}

#[test]
fn statistiques() {
    approx(val("mean(1,2,3,4)"), 2.5);
    approx(val("stdev(1,2,3,4)"), (5.0f64 / 3.0).sqrt());
    approx(val("stdevp(1,2,3,4)"), 1.25f64.sqrt());
    approx(val("stdev(5)"), 0.0);
}

#[test]
fn racines_et_logs() {
    approx(val("root(3,8)"), 2.0);
    approx(val("sqrt(16)"), 4.0);
    approx(val("log(1000)"), 3.0);
    approx(val("ln(e)"), 1.0);
    approx(val("exp(0)"), 1.0);
    approx(val("abs(-3)"), 3.0);
    approx(val("round(2.6)"), 3.0);
}

#[test]
fn expression_composee() {
    approx(val("2^2+3!*2"), 16.0);
    approx(val("nCr(5,2)*2(1+1)"), 40.0);
}

/* ------------------------ Modes d'angle ------------------------ */

#[test]
fn trig_degres_vs_radians() {
    approx(val_deg("sin(90)"), 1.0);
    approx(val_deg("cos(180)"), -1.0);
    approx(val_deg("tan(45)"), 1.0);
    // radians : sin(90) ≈ 0.894
    approx(val("sin(90)"), 0.893_996_663_600_557_9);
}

#[test]
fn trig_inverse_degres_sortie_en_degres() {
    // convention corrigée : la sortie des inverses est convertie
    approx(val_deg("asin(1)"), 90.0);
    approx(val_deg("acos(0)"), 90.0);
    approx(val_deg("atan(1)"), 45.0);
    // en radians, rien ne change
    approx(val("asin(1)"), std::f64::consts::FRAC_PI_2);
}

#[test]
fn degres_ne_touchent_pas_le_reste() {
    approx(val_deg("sqrt(4)+ln(e)"), 3.0);
}

/* ------------------------ Reconstruction rationnelle ------------------------ */

#[test]
fn aller_retour_fractions_choisies() {
    for (p, q) in [(1i64, 3i64), (22, 7), (355, 113), (-5, 8), (9999, 10000)] {
        let x = p as f64 / q as f64;
        assert_eq!(
            vers_fraction(x),
            Some(Fraction::new(p, q)),
            "aller-retour raté pour {p}/{q}"
        );
    }
}

#[test]
fn entiers_vers_fraction() {
    for n in [-100i64, -1, 0, 1, 7, 100, 1_000_000] {
        assert_eq!(vers_fraction(n as f64), Some(Fraction::from_integer(n)));
    }
}

/* ------------------------ Affichage de bout en bout ------------------------ */

#[test]
fn affichage_un_tiers() {
    let a = eval_expression("1/3", &Mode::default()).unwrap();
    assert_eq!(a.texte_decimal, "0.333333333333");
    assert_eq!(a.fraction, Some(Fraction::new(1, 3)));
    assert_eq!(a.periodique.as_deref(), Some("0.(3)"));
}

#[test]
fn affichage_cinq_quarts() {
    let a = eval_expression("5/4", &Mode::default()).unwrap();
    assert_eq!(a.texte_decimal, "1.25");
    assert_eq!(a.fraction, Some(Fraction::new(5, 4)));
    assert_eq!(a.periodique.as_deref(), Some("1.25"));
}

#[test]
fn affichage_sept_sixiemes() {
    let a = eval_expression("7/6", &Mode::default()).unwrap();
    assert_eq!(a.fraction, Some(Fraction::new(7, 6)));
    assert_eq!(a.periodique.as_deref(), Some("1.1(6)"));
}

#[test]
fn affichage_entier_sans_formes_alternatives() {
    let a = eval_expression("4/2", &Mode::default()).unwrap();
    assert_eq!(a.texte_decimal, "2");
    assert_eq!(a.fraction, None);
    assert_eq!(a.periodique, None);
}

#[test]
fn affichage_sans_forme_exacte() {
    // sqrt(2) : aucun convergent borné ne passe la tolérance
    let a = eval_expression("sqrt(2)", &Mode::default()).unwrap();
    assert_eq!(a.texte_decimal, "1.41421356237");
    assert_eq!(a.fraction, None);
    assert_eq!(a.periodique, None);
}

#[test]
fn texte_decimal_se_reparse() {
    for s in ["1/3", "sqrt(2)", "pi", "2/7", "100/7"] {
        let a = eval_expression(s, &Mode::default()).unwrap();
        let relu: f64 = a.texte_decimal.parse().expect("texte re-parsable");
        let ecart = (relu - a.valeur).abs();
        assert!(
            ecart <= 1e-11 * a.valeur.abs().max(1.0),
            "{s:?} : {relu} trop loin de {}",
            a.valeur
        );
    }
}
