// src/noyau/expr.rs
//
// AST numérique + espace de noms FERMÉ des fonctions.
//
// La liste blanche ci-dessous est la frontière de sécurité du noyau :
// aucun identifiant hors de cette liste (plus les constantes pi et e)
// n'est atteignable depuis une expression. Pas d'affectation, pas de
// boucle, pas d'état externe.

use std::f64::consts::{E, PI};

/// Expression canonique parsée.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Appel(Fonction, Vec<Expr>),
}

/// Arité admise par une fonction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arite {
    Unaire,
    Binaire,
    /// Au moins un argument (mean, stdev, stdevp).
    Variadique,
}

/// Liste blanche des fonctions du noyau.
///
/// Les variantes suffixées `d` (SinDeg, ...) sont produites par la
/// normalisation en mode degrés : trig directe = entrée convertie
/// degrés -> radians ; trig inverse = SORTIE convertie radians -> degrés
/// (convention corrigée, voir DESIGN.md).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Fact,
    Ncr,
    Npr,
    Mean,
    Stdev,
    Stdevp,
    Root,

    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    SinDeg,
    CosDeg,
    TanDeg,
    AsinDeg,
    AcosDeg,
    AtanDeg,

    Sqrt,
    Abs,
    Round,
    Ln,
    Log,
    Exp,
}

impl Fonction {
    /// Résolution nom -> fonction. `None` = identifiant hors liste blanche.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        Some(match nom {
            "fact" => Fact,
            "ncr" => Ncr,
            "npr" => Npr,
            "mean" => Mean,
            "stdev" => Stdev,
            "stdevp" => Stdevp,
            "root" => Root,

            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sind" => SinDeg,
            "cosd" => CosDeg,
            "tand" => TanDeg,
            "asind" => AsinDeg,
            "acosd" => AcosDeg,
            "atand" => AtanDeg,

            "sqrt" => Sqrt,
            "abs" => Abs,
            "round" => Round,
            "ln" => Ln,
            "log" => Log,
            "exp" => Exp,

            _ => return None,
        })
    }

    pub fn arite(self) -> Arite {
        use Fonction::*;
        match self {
            Ncr | Npr | Root => Arite::Binaire,
            Mean | Stdev | Stdevp => Arite::Variadique,
            _ => Arite::Unaire,
        }
    }
}

/// Constante nommée de la liste blanche (pi, e).
pub fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

/* ------------------------ Évaluation ------------------------ */

impl Expr {
    /// Évalue l'expression en f64.
    ///
    /// Les échecs de domaine silencieux (asin(2), ln(-1), ...) produisent
    /// un NaN qui est intercepté en fin de pipeline (eval.rs) ; les cas
    /// détectables ici renvoient une erreur descriptive pour le journal.
    pub fn eval(&self) -> Result<f64, String> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),

            Add(a, b) => Ok(a.eval()? + b.eval()?),
            Sub(a, b) => Ok(a.eval()? - b.eval()?),
            Mul(a, b) => Ok(a.eval()? * b.eval()?),
            Div(a, b) => {
                let d = b.eval()?;
                if d == 0.0 {
                    return Err("division par zéro".into());
                }
                Ok(a.eval()? / d)
            }
            Pow(a, b) => Ok(a.eval()?.powf(b.eval()?)),

            Appel(f, args) => {
                let mut vals = Vec::with_capacity(args.len());
                for a in args {
                    vals.push(a.eval()?);
                }
                appliquer(*f, &vals)
            }
        }
    }
}

fn appliquer(f: Fonction, vals: &[f64]) -> Result<f64, String> {
    use Fonction::*;

    // L'arité a été vérifiée à la construction (rpn.rs) ; ici on
    // déstructure en confiance.
    let un = || vals[0];
    let deux = || (vals[0], vals[1]);

    Ok(match f {
        Fact => factorielle(un())?,
        Ncr => {
            let (n, k) = deux();
            combinaisons(n, k)?
        }
        Npr => {
            let (n, k) = deux();
            arrangements(n, k)?
        }
        Mean => moyenne(vals),
        Stdev => ecart_type(vals, true),
        Stdevp => ecart_type(vals, false),
        Root => {
            let (indice, valeur) = deux();
            if indice == 0.0 {
                return Err("root: indice nul".into());
            }
            valeur.powf(1.0 / indice)
        }

        Sin => un().sin(),
        Cos => un().cos(),
        Tan => un().tan(),
        Asin => un().asin(),
        Acos => un().acos(),
        Atan => un().atan(),

        SinDeg => un().to_radians().sin(),
        CosDeg => un().to_radians().cos(),
        TanDeg => un().to_radians().tan(),
        AsinDeg => un().asin().to_degrees(),
        AcosDeg => un().acos().to_degrees(),
        AtanDeg => un().atan().to_degrees(),

        Sqrt => un().sqrt(),
        Abs => un().abs(),
        // demi arrondi vers +∞ : round(-2.5) = -2, pas -3
        Round => (un() + 0.5).floor(),
        Ln => un().ln(),
        Log => un().log10(),
        Exp => un().exp(),
    })
}

/* ------------------------ Bibliothèque numérique ------------------------ */

// Au-delà de 170!, le résultat dépasse f64 : borne dure plutôt qu'une
// boucle inutile vers l'infini.
const FACT_MAX: f64 = 170.0;

fn factorielle(x: f64) -> Result<f64, String> {
    let n = x.floor();
    if !n.is_finite() || n < 0.0 {
        return Err("factorielle: argument négatif ou non fini".into());
    }
    if n > FACT_MAX {
        return Err("factorielle: argument trop grand (> 170)".into());
    }

    let mut r = 1.0f64;
    let mut i = 2.0f64;
    while i <= n {
        r *= i;
        i += 1.0;
    }
    Ok(r)
}

/// nCr(n, k) = n! / (k!(n-k)!) ; 0 si k > n ou k < 0.
fn combinaisons(n: f64, k: f64) -> Result<f64, String> {
    let n = n.floor();
    let k = k.floor();
    if k > n || k < 0.0 {
        return Ok(0.0);
    }
    Ok(factorielle(n)? / (factorielle(k)? * factorielle(n - k)?))
}

/// nPr(n, k) = n! / (n-k)! ; 0 si k > n ou k < 0.
fn arrangements(n: f64, k: f64) -> Result<f64, String> {
    let n = n.floor();
    let k = k.floor();
    if k > n || k < 0.0 {
        return Ok(0.0);
    }
    Ok(factorielle(n)? / factorielle(n - k)?)
}

fn moyenne(vals: &[f64]) -> f64 {
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Écart-type : échantillon (diviseur n-1) ou population (diviseur n).
/// Conventions de la source : n <= 1 en échantillon -> 0.
fn ecart_type(vals: &[f64], echantillon: bool) -> f64 {
    let n = vals.len();
    if echantillon && n <= 1 {
        return 0.0;
    }
    let m = moyenne(vals);
    let s: f64 = vals.iter().map(|v| (v - m) * (v - m)).sum();
    let div = if echantillon { (n - 1) as f64 } else { n as f64 };
    (s / div).sqrt()
}
