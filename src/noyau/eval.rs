//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> équilibrer -> tokenize -> RPN -> Expr -> f64
//!
//! Deux entrées :
//! - `evaluer`  : texte canonique DÉJÀ fermé (seul endroit où l’on parse)
//! - `calculer` : notation affichée, pipeline complet (utilisé par la session)
//!
//! Échec fermé : toute erreur (syntaxe, domaine, NaN, ±∞) devient `Err`,
//! jamais une panique ni une valeur non finie.

use tracing::trace;

use super::erreur::ErreurCalcul;
use super::jetons::{format_tokens, tokenize};
use super::normalise::normaliser;
use super::parentheses::equilibrer;
use super::rpn::{from_rpn, to_rpn};
use super::trig::UniteAngle;

/// Résultat d’une évaluation : un nombre fini, ou une erreur classée.
pub type Evaluation = Result<f64, ErreurCalcul>;

pub fn evaluer(texte_ferme: &str) -> Evaluation {
    let s = texte_ferme.trim();
    if s.is_empty() {
        return Err(ErreurCalcul::syntaxe("entrée vide"));
    }

    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    trace!(rpn = %format_tokens(&rpn), "rpn");

    let v = from_rpn(&rpn)?.evaluer()?;

    if v.is_nan() {
        return Err(ErreurCalcul::domaine("résultat indéfini"));
    }
    if v.is_infinite() {
        return Err(ErreurCalcul::domaine("résultat infini"));
    }
    Ok(v)
}

pub fn calculer(affiche: &str, unite: UniteAngle) -> Evaluation {
    let canonique = normaliser(affiche, unite);
    let ferme = equilibrer(&canonique, unite);
    trace!(%affiche, %ferme, ?unite, "calcul");
    evaluer(&ferme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &str) -> f64 {
        calculer(s, UniteAngle::Radians).unwrap_or_else(|e| panic!("calculer({s:?}) erreur: {e}"))
    }

    fn ok_deg(s: &str) -> f64 {
        calculer(s, UniteAngle::Degres).unwrap_or_else(|e| panic!("calculer({s:?}) erreur: {e}"))
    }

    fn assert_proche(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "attendu {b}, obtenu {a}");
    }

    fn assert_domaine(s: &str) {
        let r = calculer(s, UniteAngle::Radians);
        assert!(
            matches!(r, Err(ErreurCalcul::Domaine(_))),
            "attendu erreur de domaine pour {s:?}, obtenu {r:?}"
        );
    }

    // --- Arithmétique ---

    #[test]
    fn arithmetique_glyphes() {
        assert_eq!(ok("2+2"), 4.0);
        assert_eq!(ok("6×7"), 42.0);
        assert_eq!(ok("9÷4"), 2.25);
        assert_eq!(ok("5−8"), -3.0);
        assert_eq!(ok("2^10"), 1024.0);
    }

    #[test]
    fn saisie_incomplete_equilibree() {
        assert_eq!(ok("2×(3+4"), 14.0);
        assert_eq!(ok("√(16"), 4.0);
        assert_eq!(ok("abs(−3"), 3.0);
    }

    #[test]
    fn constantes() {
        assert_proche(ok("π"), std::f64::consts::PI);
        assert_proche(ok("2π"), 2.0 * std::f64::consts::PI);
        assert_proche(ok("ln(e)"), 1.0);
    }

    #[test]
    fn factorielle_et_pourcentage() {
        assert_eq!(ok("5!"), 120.0);
        assert_eq!(ok("3!+1"), 7.0);
        assert_eq!(ok("50%"), 0.5);
        assert_eq!(ok("200×10%"), 20.0);
    }

    #[test]
    fn notation_scientifique() {
        assert_eq!(ok("5×10^3"), 5000.0);
        assert_proche(ok("5×10^−3"), 0.005);
        // résultat exponentiel réutilisé tel quel
        assert_eq!(ok("1.00000000e+15"), 1e15);
    }

    // --- Trig ---

    #[test]
    fn trig_radians() {
        assert_proche(ok("sin(π/2)"), 1.0);
        assert_proche(ok("cos(0)"), 1.0);
    }

    #[test]
    fn trig_degres() {
        assert_proche(ok_deg("sin(90)"), 1.0);
        assert_proche(ok_deg("cos(60)"), 0.5);
        assert_proche(ok_deg("tan(45"), 1.0);
        // saisie fermée par l’utilisateur : l’enveloppe est fermée par l’équilibrage
        assert_proche(ok_deg("2sin(30)"), 1.0);
    }

    #[test]
    fn inverse_toujours_en_radians() {
        assert_proche(ok_deg("asin(1)"), std::f64::consts::FRAC_PI_2);
        assert_proche(ok("atan(1)"), std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn logarithmes() {
        assert_proche(ok("log(1000)"), 3.0);
        assert_proche(ok("ln(1)"), 0.0);
    }

    // --- Erreurs ---

    #[test]
    fn erreurs_domaine() {
        assert_domaine("5/0");
        assert_domaine("5÷(2−2)");
        assert_domaine("√(−4)");
        assert_domaine("ln(0)");
        assert_domaine("−1!");
        assert_domaine("171!");
        assert_domaine("10^400");
    }

    #[test]
    fn erreurs_syntaxe() {
        for s in ["", "   ", "2+", "2×÷3", "e+2", "1.2.3", "exp(1)"] {
            let r = calculer(s, UniteAngle::Radians);
            assert!(
                matches!(r, Err(ErreurCalcul::Syntaxe(_))),
                "attendu erreur de syntaxe pour {s:?}, obtenu {r:?}"
            );
        }
    }

    #[test]
    fn double_multiplication_refusee() {
        for s in ["2××3", "2**3"] {
            let r = calculer(s, UniteAngle::Radians);
            assert!(
                matches!(r, Err(ErreurCalcul::Syntaxe(_))),
                "attendu erreur de syntaxe pour {s:?}, obtenu {r:?}"
            );
        }
    }

    #[test]
    fn noms_internes_hors_saisie() {
        for s in ["rad(180)", "sqrt(4)", "log10(100)", "SQRT(4)", "2rad(1)"] {
            for u in [UniteAngle::Radians, UniteAngle::Degres] {
                let r = calculer(s, u);
                assert!(
                    matches!(r, Err(ErreurCalcul::Syntaxe(_))),
                    "attendu erreur de syntaxe pour {s:?} ({u:?}), obtenu {r:?}"
                );
            }
        }
        // pas de double conversion en degrés
        assert!(matches!(
            calculer("sin(rad(90", UniteAngle::Degres),
            Err(ErreurCalcul::Syntaxe(_))
        ));
        // les formes affichées restent valides, quelle que soit la casse
        assert_proche(ok("√(4)+log(100)"), 4.0);
        assert_proche(ok_deg("SIN(90)"), 1.0);
    }

    #[test]
    fn evaluer_texte_canonique() {
        assert_eq!(evaluer("sqrt(16)*2"), Ok(8.0));
        let l = evaluer("log10(100)").unwrap();
        assert!((l - 2.0).abs() < 1e-12);
        assert_eq!(evaluer("sqrt(rad(0))"), Ok(0.0));
        assert!(evaluer("NaN").is_err());
    }
}
