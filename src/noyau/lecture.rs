// src/noyau/lecture.rs
//
// Lecture exacte d'un résultat flottant :
// - vers_fraction : meilleure fraction à dénominateur borné
//   (développement en fraction continue, convergents h/k)
// - developpement : développement décimal d'une fraction par division
//   longue, avec détection du cycle périodique (répétition de reste)
// - texte_periodique : rendu "0.(3)", "1.25", "1.1(6)"
//
// Les bornes (tolérance, dénominateur, chiffres, itérations) sont des
// points de réglage, pas des garanties mathématiques : une valeur sans
// fraction dans la borne est « sans forme exacte », jamais une erreur.

use std::collections::HashMap;

use num_rational::Ratio;
use num_traits::{Signed, Zero};

/// Fraction réduite, dénominateur strictement positif (invariants de Ratio).
pub type Fraction = Ratio<i64>;

/// Tolérance absolue de la reconstruction (fraction continue + exactitude).
pub const TOLERANCE: f64 = 1e-12;

/// Dénominateur maximal par défaut.
pub const DEN_MAX: i64 = 10_000;

/// Budget de chiffres de la division longue.
pub const CHIFFRES_MAX: usize = 2000;

// Nombre maximal de convergents calculés.
const ITERATIONS_MAX: usize = 80;

/* ------------------------ Fraction continue ------------------------ */

/// `vers_fraction(x)` avec le dénominateur maximal par défaut.
pub fn vers_fraction(x: f64) -> Option<Fraction> {
    vers_fraction_avec(x, DEN_MAX)
}

/// Meilleure approximation rationnelle de `x` à dénominateur <= `den_max`,
/// par convergents de fraction continue (récurrence h_i = a_i*h_{i-1} + h_{i-2}).
///
/// Attention : le résultat est la meilleure approximation BORNÉE, pas une
/// égalité. L'appelant qui veut une forme exacte doit revérifier la
/// tolérance (voir format.rs).
pub fn vers_fraction_avec(x: f64, den_max: i64) -> Option<Fraction> {
    if !x.is_finite() || den_max < 1 {
        return None;
    }

    let neg = x < 0.0;
    let x = x.abs();

    let mut a = x.floor();

    // entier (à la tolérance près) : réponse immédiate n/1
    if (a - x).abs() < TOLERANCE {
        let n = en_i64(a)?;
        return Some(signe(Fraction::from_integer(n), neg));
    }

    // convergents : h/k courant, h1/k1 précédent
    let (mut h1, mut k1, mut h, mut k) = (1.0f64, 0.0f64, a, 1.0f64);
    let mut frac = x - a;
    let mut it = 0;

    while (h / k - x).abs() > TOLERANCE && it < ITERATIONS_MAX {
        it += 1;
        frac = 1.0 / frac;
        a = frac.floor();

        let (h2, k2) = (h1, k1);
        h1 = h;
        k1 = k;
        h = a * h1 + h2;
        k = a * k1 + k2;

        if k > den_max as f64 {
            // débordement : on rend le dernier convergent dans la borne
            h = h1;
            k = k1;
            break;
        }

        frac -= a;
        if frac == 0.0 {
            break;
        }
    }

    let num = en_i64(h.round())?;
    let den = en_i64(k.round())?;
    if den == 0 {
        return None;
    }

    // Ratio::new réduit par le pgcd et garde le dénominateur positif
    Some(signe(Fraction::new(num, den), neg))
}

fn signe(f: Fraction, neg: bool) -> Fraction {
    if neg {
        -f
    } else {
        f
    }
}

fn en_i64(x: f64) -> Option<i64> {
    if x.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(x as i64)
}

/* ------------------------ Division longue ------------------------ */

/// Développement décimal de |num|/|den|.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Developpement {
    pub partie_entiere: String,
    pub non_periodique: String,
    /// Vide : le développement termine (dans le budget de chiffres).
    pub periodique: String,
}

/// Division longue avec détection de cycle : chaque reste vu est mémorisé
/// avec sa position ; un reste déjà vu clôt la période.
///
/// `max_chiffres` borne le travail (terminaison garantie). Budget épuisé :
/// le développement est rendu comme non périodique tronqué — une
/// approximation partielle, pas un décimal fini certifié.
///
/// Le signe est ignoré ici (porté par l'appelant) ; `den` == 0 est une
/// violation de contrat (l'invariant de Fraction l'exclut).
pub fn developpement(num: i64, den: i64, max_chiffres: usize) -> Developpement {
    debug_assert!(den != 0, "dénominateur nul : contrat Fraction violé");

    let num = num.abs();
    let den = den.abs();

    let partie_entiere = (num / den).to_string();
    let mut reste = num % den;

    let mut chiffres = String::new();
    let mut vus: HashMap<i64, usize> = HashMap::new();
    let mut pos = 0usize;

    while !reste.is_zero() && pos < max_chiffres {
        if let Some(&debut) = vus.get(&reste) {
            // cycle : de `debut` à pos-1
            return Developpement {
                partie_entiere,
                non_periodique: chiffres[..debut].to_string(),
                periodique: chiffres[debut..].to_string(),
            };
        }
        vus.insert(reste, pos);

        reste *= 10;
        let d = (reste / den) as u8;
        chiffres.push(char::from(b'0' + d));
        reste %= den;
        pos += 1;
    }

    // terminaison (ou budget épuisé) : pas de période
    Developpement {
        partie_entiere,
        non_periodique: chiffres,
        periodique: String::new(),
    }
}

/// Rendu décimal périodique d'une fraction : "0.(3)", "1.25", "1.1(6)".
/// Le signe de la fraction est conservé.
pub fn texte_periodique(f: &Fraction) -> String {
    let dev = developpement(*f.numer(), *f.denom(), CHIFFRES_MAX);
    let signe = if f.is_negative() { "-" } else { "" };
    let ent = &dev.partie_entiere;

    match (dev.non_periodique.is_empty(), dev.periodique.is_empty()) {
        (true, true) => format!("{signe}{ent}"),
        (false, true) => format!("{signe}{ent}.{}", dev.non_periodique),
        (true, false) => format!("{signe}{ent}.({})", dev.periodique),
        (false, false) => format!("{signe}{ent}.{}({})", dev.non_periodique, dev.periodique),
    }
}

/* ------------------------ Tests ------------------------ */
