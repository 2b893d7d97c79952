// src/main.rs
//
// Calculatrice scientifique — REPL minimal.
//
// Le binaire joue le rôle de « l'appelant » du noyau : il possède le
// mode (Rad/Deg), la réponse précédente (ANS) et un historique borné.
// Le noyau, lui, reste pur (voir lib.rs).
//
// Commandes : deg / rad / ans / historique / quitter

use std::io::{self, BufRead, Write};

use calculatrice_sci::{eval_expression, Affichage, Mode, UniteAngle};

/// Taille maximale de l'historique (comme la source : 8 entrées).
const HISTORIQUE_MAX: usize = 8;

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut mode = Mode::default();
    let mut historique: Vec<(String, String)> = Vec::new();

    println!("Calculatrice scientifique — mode {}", nom_unite(&mode));
    println!("(deg / rad / ans / historique / quitter)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut ligne = String::new();
        if stdin.lock().read_line(&mut ligne)? == 0 {
            break; // EOF
        }
        let entree = ligne.trim();

        match entree {
            "" => continue,
            "quitter" | "q" => break,
            "deg" => {
                mode.unite_angle = UniteAngle::Degres;
                println!("mode {}", nom_unite(&mode));
                continue;
            }
            "rad" => {
                mode.unite_angle = UniteAngle::Radians;
                println!("mode {}", nom_unite(&mode));
                continue;
            }
            "ans" => {
                match mode.reponse_precedente {
                    Some(v) => println!("ANS = {v}"),
                    None => println!("ANS = (aucune)"),
                }
                continue;
            }
            "historique" => {
                for (expr, res) in historique.iter().rev() {
                    println!("  {expr}  =  {res}");
                }
                continue;
            }
            _ => {}
        }

        match eval_expression(entree, &mode) {
            Ok(a) => {
                afficher(&a);
                // ANS : valeur brute, re-fournie au prochain appel
                mode.reponse_precedente = Some(a.valeur);
                pousser_historique(&mut historique, entree, &a.texte_decimal);
            }
            Err(e) => println!("erreur : {e}"),
        }
    }

    Ok(())
}

fn afficher(a: &Affichage) {
    println!("= {}", a.texte_decimal);
    if let Some(f) = &a.fraction {
        println!("  fraction : {}/{}", f.numer(), f.denom());
    }
    if let Some(p) = &a.periodique {
        println!("  décimal  : {p}");
    }
}

fn pousser_historique(historique: &mut Vec<(String, String)>, expr: &str, res: &str) {
    historique.push((expr.to_string(), res.to_string()));
    if historique.len() > HISTORIQUE_MAX {
        historique.remove(0);
    }
}

fn nom_unite(mode: &Mode) -> &'static str {
    match mode.unite_angle {
        UniteAngle::Radians => "radians",
        UniteAngle::Degres => "degrés",
    }
}
