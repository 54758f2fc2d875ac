// src/noyau/format.rs
//
// Affichage d’un résultat f64 (largeur bornée, indépendant de la locale)
// ----------------------------------------------------------------------
// Trois paliers:
// - entier      : valeur entière et |v| < 1e15        -> "42", "-7"
// - exponentiel : |v| >= 1e15, ou 0 < |v| < 1e-6      -> "1.00000000e+15", "5.00000000e-7"
// - fixe        : arrondi à 12 chiffres significatifs, plus courte écriture -> "0.3"
//
// Bornes exactes : 1e15 est exponentiel, 1e-6 est fixe ("0.000001").
// La forme exponentielle est relue telle quelle par jetons.rs (réutilisation du résultat).

/// Au-delà (inclus) : palier exponentiel.
pub const SEUIL_GRAND: f64 = 1e15;

/// En deçà (exclu) : palier exponentiel (hors zéro).
pub const SEUIL_PETIT: f64 = 1e-6;

const CHIFFRES_FRACTION_EXP: usize = 8;
const CHIFFRES_SIGNIFICATIFS: usize = 12;

pub fn formater(v: f64) -> String {
    // jamais produit par calculer() ; écriture brute ("NaN", "inf")
    if !v.is_finite() {
        return format!("{v}");
    }

    let a = v.abs();

    if v.fract() == 0.0 && a < SEUIL_GRAND {
        // -0.0 -> "0"
        return format!("{}", v as i64);
    }

    if a >= SEUIL_GRAND || (a != 0.0 && a < SEUIL_PETIT) {
        return format_exponentiel(v);
    }

    format_fixe(v)
}

/// "{:.8e}" donne "1.00000000e15" : on ajoute le signe d’exposant ("e+15").
fn format_exponentiel(v: f64) -> String {
    let s = format!("{:.*e}", CHIFFRES_FRACTION_EXP, v);
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}

/// Arrondi à 12 chiffres significatifs, puis écriture la plus courte qui relit la même valeur.
fn format_fixe(v: f64) -> String {
    let arrondi = format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v)
        .parse::<f64>()
        .unwrap_or(v);
    format!("{arrondi}")
}
