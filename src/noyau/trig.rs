// src/noyau/trig.rs
//
// Unité d’angle + réécriture des fonctions (étape 6 du normaliseur)
// ----------------------------------------------------------------
// - sin( / cos( / tan(  : en degrés, on insère l’enveloppe "rad(" (degrés → radians)
//                         et la ')' qui ferme l’appel ferme aussi l’enveloppe ("))")
//                         => sin(90)×2 = sin(rad(90))*2, pas sin(rad(90)*2)
// - asin/acos/atan      : jamais convertis (résultat toujours en radians)
// - log( -> log10(  ;  √( -> sqrt(  ;  √N -> sqrt(N)
// - ln( / abs(          : déjà canoniques
// - rad / log10 / sqrt  : noms internes ; tapés dans la saisie, ils sont neutralisés

use serde::Deserialize;

use super::normalise::{commence_par, fin_litteral};

/// Enveloppe insérée après sin(/cos(/tan( en mode degrés.
pub const ENVELOPPE_DEGRES: &str = "rad(";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniteAngle {
    #[default]
    Radians,
    Degres,
}

impl UniteAngle {
    pub fn basculer(self) -> Self {
        match self {
            UniteAngle::Radians => UniteAngle::Degres,
            UniteAngle::Degres => UniteAngle::Radians,
        }
    }

    /// Libellé court (bouton DEG/RAD).
    pub fn libelle(self) -> &'static str {
        match self {
            UniteAngle::Radians => "RAD",
            UniteAngle::Degres => "DEG",
        }
    }
}

fn precede_par_lettre(chars: &[char], i: usize) -> bool {
    i > 0 && (chars[i - 1].is_ascii_alphabetic() || chars[i - 1] == '_')
}

/// Noms canoniques internes : jamais acceptés depuis la saisie affichée.
pub const NOMS_RESERVES: [&str; 3] = ["rad", "log10", "sqrt"];

/// Préfixe qui neutralise un nom réservé tapé tel quel ("rad(" -> "_rad(", refusé au parse).
const NEUTRALISE: char = '_';

fn fin_mot(chars: &[char], i: usize) -> usize {
    let mut j = i;
    while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '_') {
        j += 1;
    }
    j
}

/// Étape 6 : noms de fonctions affichés -> noms canoniques (+ enveloppe degrés).
///
/// Lecture par mots entiers, sans tenir compte de la casse ("SIN(" = "sin(").
/// Les noms réservés (rad, log10, sqrt) tapés par l’utilisateur sont neutralisés :
/// seule cette étape peut les produire.
pub fn reecrire_fonctions(s: &str, unite: UniteAngle) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut i = 0;

    // une entrée par '(' ouverte : true si c’est un appel trig enveloppé
    let mut groupes: Vec<bool> = Vec::new();

    while i < chars.len() {
        let c = chars[i];

        if c == '(' {
            groupes.push(false);
        }
        if c == ')' && groupes.pop() == Some(true) {
            out.push(')');
        }

        if c == '√' {
            if commence_par(&chars, i + 1, "(") {
                out.push_str("sqrt(");
                groupes.push(false);
                i += 2;
                continue;
            }
            // √9 : argument littéral sans parenthèses
            let fin = fin_litteral(&chars, i + 1);
            if fin > i + 1 {
                out.push_str("sqrt(");
                out.extend(&chars[i + 1..fin]);
                out.push(')');
                i = fin;
                continue;
            }
            out.push_str("sqrt");
            i += 1;
            continue;
        }

        if c.is_ascii_alphabetic() && !precede_par_lettre(&chars, i) {
            let fin = fin_mot(&chars, i);
            let brut: String = chars[i..fin].iter().collect();
            let mot = brut.to_ascii_lowercase();
            let appel = chars.get(fin) == Some(&'(');
            i = fin;

            match mot.as_str() {
                "sin" | "cos" | "tan" if appel => {
                    out.push_str(&mot);
                    out.push('(');
                    let enveloppe = unite == UniteAngle::Degres;
                    if enveloppe {
                        out.push_str(ENVELOPPE_DEGRES);
                    }
                    groupes.push(enveloppe);
                    i += 1;
                }
                "log" if appel => {
                    out.push_str("log10(");
                    groupes.push(false);
                    i += 1;
                }
                m if NOMS_RESERVES.contains(&m) => {
                    out.push(NEUTRALISE);
                    out.push_str(m);
                }
                // asin, ln, abs, NaN, inf, exposant "e5"... : recopiés tels quels
                _ => out.push_str(&brut),
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}
