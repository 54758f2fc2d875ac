//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - longueur / profondeur bornées
//! - budget temps global
//! - invariants clés :
//!   * calculer() ne panique jamais et ne rend jamais NaN/∞
//!   * equilibrer() est idempotent
//!   * un résultat formaté se relit (réutilisation d’un résultat)

use std::time::{Duration, Instant};

use super::{calculer, equilibrer, formater, normaliser, UniteAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

/// Touches du clavier de la calculatrice (notation affichée).
const TOUCHES: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "−", "×", "÷", "^", "(", ")",
    "π", "e", "!", "%", "×10^", "sin(", "cos(", "tan(", "asin(", "acos(", "atan(", "log(", "ln(",
    "abs(", "√(", "٣", "٫",
];

fn gen_saisie(rng: &mut Rng, max_touches: u32) -> String {
    let n = 1 + rng.pick(max_touches);
    (0..n)
        .map(|_| TOUCHES[rng.pick(TOUCHES.len() as u32) as usize])
        .collect()
}

/// Expression entière parenthésée + sa valeur attendue (calculée à part, en i64).
fn gen_entier(rng: &mut Rng, depth: usize) -> (String, i64) {
    if depth == 0 || rng.pick(4) == 0 {
        let v = rng.pick(10) as i64;
        return (v.to_string(), v);
    }

    let (a, va) = gen_entier(rng, depth - 1);
    let (b, vb) = gen_entier(rng, depth - 1);

    match rng.pick(3) {
        0 => (format!("({a}+{b})"), va + vb),
        1 => (format!("({a}−{b})"), va - vb),
        _ => (format!("({a}×{b})"), va * vb),
    }
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_saisie_jamais_de_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..1500 {
        budget(t0, max);

        let saisie = gen_saisie(&mut rng, 12);
        let unite = if rng.coin() {
            UniteAngle::Degres
        } else {
            UniteAngle::Radians
        };

        match calculer(&saisie, unite) {
            Ok(v) => {
                assert!(v.is_finite(), "saisie={saisie:?} v={v}");
                seen_ok += 1;
            }
            Err(_) => seen_err += 1,
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_equilibrage_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..800 {
        budget(t0, max);

        let saisie = gen_saisie(&mut rng, 16);
        for unite in [UniteAngle::Radians, UniteAngle::Degres] {
            let une = equilibrer(&normaliser(&saisie, unite), unite);
            let deux = equilibrer(&une, unite);
            assert_eq!(une, deux, "saisie={saisie:?} unite={unite:?}");
        }
    }
}

#[test]
fn fuzz_safe_arithmetique_entiere_exacte() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..400 {
        budget(t0, max);

        // profondeur 3 : |valeur| <= 9^8, reste sous 1e15 et exact en f64
        let (expr, attendu) = gen_entier(&mut rng, 3);
        let v = calculer(&expr, UniteAngle::Radians)
            .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(formater(v), attendu.to_string(), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_resultat_relu() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let mut rng = Rng::new(0xFACADE_u64);
    let mut relus = 0usize;

    for _ in 0..1500 {
        budget(t0, max);

        let saisie = gen_saisie(&mut rng, 10);
        let Ok(v) = calculer(&saisie, UniteAngle::Radians) else {
            continue;
        };
        // hors zone sous-normale / bord de f64::MAX : 9 chiffres ne suffisent plus
        if v != 0.0 && !(1e-300..1e300).contains(&v.abs()) {
            continue;
        }

        let texte = formater(v);
        let relu = calculer(&texte, UniteAngle::Radians)
            .unwrap_or_else(|e| panic!("saisie={saisie:?} texte={texte:?} err={e}"));

        let ecart = if v == 0.0 {
            relu.abs()
        } else {
            ((relu - v) / v).abs()
        };
        assert!(ecart < 1e-8, "saisie={saisie:?} texte={texte:?} relu={relu}");
        relus += 1;
    }

    assert!(relus > 10, "trop peu de résultats relus: {relus}");
}
