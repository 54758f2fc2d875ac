//! Tests scientifiques (campagne) : propriétés du pipeline affiché -> formaté.
//!
//! But : vérifier les invariants sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées
//!
//! Notes :
//! - Les propriétés de session (historique, mémoire, effacement atomique) vivent
//!   dans app/etat.rs, à côté de la structure qu’elles décrivent.
//! - sin(180°) vaut ~1.2e-16 en f64 (pas 0) : on compare avec une tolérance.

use std::time::{Duration, Instant};

use super::{calculer, equilibrer, formater, normaliser, ErreurCalcul, UniteAngle};

const TOLERANCE: f64 = 1e-9;

fn affiche(expr: &str) -> String {
    let v = calculer(expr, UniteAngle::Radians).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
    formater(v)
}

fn assert_proches(a: f64, b: f64, ctx: &str) {
    assert!((a - b).abs() < TOLERANCE, "{ctx}: {a} vs {b}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Arithmétique entière ------------------------ */

#[test]
fn sci_entiers_formates_sans_decimale() {
    let cas = [
        ("2+2", "4"),
        ("7×8", "56"),
        ("100÷4", "25"),
        ("3−10", "-7"),
        ("(1+2)×(3+4)", "21"),
        ("2^10", "1024"),
        ("10!", "3628800"),
        ("−(5)", "-5"),
        ("1000000×1000000", "1000000000000"),
    ];
    for (expr, attendu) in cas {
        assert_eq!(affiche(expr), attendu, "expr={expr:?}");
    }
}

#[test]
fn sci_decimaux_sans_bruit() {
    assert_eq!(affiche("0.1+0.2"), "0.3");
    assert_eq!(affiche("1÷3"), "0.333333333333");
    assert_eq!(affiche("10%"), "0.1");
}

/* ------------------------ Degrés / radians ------------------------ */

#[test]
fn sci_equivalence_degres_radians() {
    let paires = [
        ("sin(90)", "sin(π/2)"),
        ("cos(60)", "cos(π/3)"),
        ("tan(45)", "tan(π/4)"),
        ("sin(30)", "sin(π/6)"),
        ("cos(180)", "cos(π)"),
        ("sin(−45)", "sin(−π/4)"),
    ];
    for (deg, rad) in paires {
        let a = calculer(deg, UniteAngle::Degres).unwrap_or_else(|e| panic!("{deg}: {e}"));
        let b = calculer(rad, UniteAngle::Radians).unwrap_or_else(|e| panic!("{rad}: {e}"));
        assert_proches(a, b, deg);
    }
}

#[test]
fn sci_degres_saisie_ouverte() {
    // appel non fermé en degrés : l’équilibrage ferme appel + enveloppe
    let a = calculer("sin(90", UniteAngle::Degres).unwrap();
    assert_proches(a, 1.0, "sin(90");
    let b = calculer("cos(sin(90)×60", UniteAngle::Degres).unwrap();
    assert_proches(b, 0.5, "cos(sin(90)×60");
}

#[test]
fn sci_unite_sans_effet_hors_trig() {
    for expr in ["2+3×4", "√(2)", "log(100)", "asin(0.5)", "5!"] {
        let a = calculer(expr, UniteAngle::Degres).unwrap();
        let b = calculer(expr, UniteAngle::Radians).unwrap();
        assert_eq!(a, b, "expr={expr:?}");
    }
}

/* ------------------------ Factorielle ------------------------ */

#[test]
fn sci_factorielle_bornes() {
    assert!(normaliser("5!", UniteAngle::Radians).contains("120"));

    let sature = normaliser("171!", UniteAngle::Radians);
    assert_eq!(sature, "inf");
    assert_eq!(sature.parse::<f64>(), Ok(f64::INFINITY));

    assert!(matches!(
        calculer("-1!", UniteAngle::Radians),
        Err(ErreurCalcul::Domaine(_))
    ));

    // 170! est le dernier représentable
    let v = calculer("170!", UniteAngle::Radians).unwrap();
    assert!(v.is_finite() && v > 7.2e306);
    assert_eq!(formater(v), "7.25741562e+306");
}

/* ------------------------ Équilibrage ------------------------ */

#[test]
fn sci_equilibrage_idempotent() {
    let textes = [
        "sin(90",
        "2×(3+(4",
        "cos(tan(1",
        "√(2",
        "abs(−(3",
        "1+2",
        "((",
        ")(",
    ];
    for t in textes {
        for u in [UniteAngle::Radians, UniteAngle::Degres] {
            let canon = normaliser(t, u);
            let une = equilibrer(&canon, u);
            let deux = equilibrer(&une, u);
            assert_eq!(une, deux, "t={t:?} u={u:?}");
        }
    }
}

/* ------------------------ Format : bornes ------------------------ */

#[test]
fn sci_format_bornes_exactes() {
    assert_eq!(formater(999_999_999_999_999.0), "999999999999999");
    assert_eq!(formater(1e15), "1.00000000e+15");
    assert_eq!(formater(1e-6), "0.000001");
    assert_eq!(formater(9.99e-7), "9.99000000e-7");
}

#[test]
fn sci_resultat_reutilisable() {
    // un résultat formaté, retapé, redonne (presque) la même valeur
    for expr in ["2^60", "1÷7", "√(2)", "10^−9", "0−170!"] {
        let v = calculer(expr, UniteAngle::Radians).unwrap();
        let texte = formater(v);
        let relu = calculer(&texte, UniteAngle::Radians)
            .unwrap_or_else(|e| panic!("relecture {texte:?}: {e}"));
        assert!(
            ((relu - v) / v).abs() < 1e-8,
            "expr={expr:?} texte={texte:?} relu={relu}"
        );
    }
}

/* ------------------------ Stress contrôlé ------------------------ */

#[test]
fn sci_stress_imbrication_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 200 niveaux de √( ouverts, jamais fermés : l’équilibrage ferme tout
    let mut expr = String::new();
    for _ in 0..200 {
        expr.push_str("√(");
        budget(t0, max);
    }
    expr.push_str("256");

    let v = calculer(&expr, UniteAngle::Radians).unwrap();
    assert_proches(v, 1.0, "√^200(256)");
    budget(t0, max);
}

#[test]
fn sci_stress_longue_somme_safe() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["1"; 1000].join("+");
    assert_eq!(affiche(&expr), "1000");
    budget(t0, max);
}
