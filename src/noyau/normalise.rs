//! Noyau — normaliseur (notation affichée -> forme canonique)
//!
//! Réécriture lexicale pure, sans arbre : l’ordre des étapes compte.
//!
//! 1. glyphes localisés (× ÷ −, chiffres arabes-indiens, séparateur ٫)
//! 2. constantes π et e (littéraux entre parenthèses)
//! 3. puissance (^, ², ³)
//! 4. factorielle postfixée, calculée tout de suite (N! -> valeur)
//! 5. pourcentage postfixé (N% -> (N/100))
//! 6. noms de fonctions + enveloppe degrés (voir trig.rs)
//! 7. aide notation scientifique (×10^N -> *10^(N))
//!
//! Ne panique jamais : un fragment illisible passe tel quel et échouera au parse.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

use super::trig::{reecrire_fonctions, UniteAngle};

/// Plus grand n tel que n! reste représentable en f64 (170! ≈ 7.3e306).
pub const FACTORIELLE_MAX: u32 = 170;

pub fn normaliser(texte: &str, unite: UniteAngle) -> String {
    let s = remplacer_glyphes(texte);
    let s = substituer_constantes(&s);
    let s = remplacer_puissance(&s);
    let s = reecrire_suffixe(&s, '!', true, |x| format!("{}", factorielle(x)));
    let s = reecrire_suffixe(&s, '%', false, |x| format!("({x}/100)"));
    let s = reecrire_fonctions(&s, unite);
    developper_puissance_de_dix(&s)
}

/// n! en f64.
/// - n entier négatif ou non entier : NaN
/// - n > 170 : +∞ (saturation)
pub fn factorielle(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 || n.fract() != 0.0 {
        return f64::NAN;
    }
    if n > FACTORIELLE_MAX as f64 {
        return f64::INFINITY;
    }

    // produit exact, un seul arrondi à la fin
    let n = n as u32;
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= k;
    }
    acc.to_f64().unwrap_or(f64::INFINITY)
}

/// Fin d’un littéral décimal simple (chiffres, au plus un point) qui commence en `i`.
/// Retourne `i` si rien n’est lisible.
pub(crate) fn fin_litteral(chars: &[char], i: usize) -> usize {
    let mut j = i;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j < chars.len() && chars[j] == '.' {
        let k = j + 1;
        let mut m = k;
        while m < chars.len() && chars[m].is_ascii_digit() {
            m += 1;
        }
        // "5." compte, "." seul non
        if m > k || j > i {
            j = m;
        }
    }
    j
}

/* ------------------------ Étape 1 : glyphes ------------------------ */

fn remplacer_glyphes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            '٫' => '.',
            '\u{0660}'..='\u{0669}' => chiffre_ascii(c, 0x0660),
            '\u{06F0}'..='\u{06F9}' => chiffre_ascii(c, 0x06F0),
            _ => c,
        })
        .collect()
}

fn chiffre_ascii(c: char, zero: u32) -> char {
    char::from_digit(c as u32 - zero, 10).unwrap_or(c)
}

/* ------------------------ Étape 2 : constantes ------------------------ */

fn est_lettre(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_ascii_alphabetic() || *c == '_')
}

fn est_chiffre(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_ascii_digit())
}

/// `e` isolé seulement : pas dans un identifiant, pas un exposant (1e5, 2e-3).
fn est_constante_e(chars: &[char], i: usize) -> bool {
    let avant = if i > 0 { chars.get(i - 1) } else { None };
    let apres = chars.get(i + 1);

    if est_lettre(avant) || est_lettre(apres) || est_chiffre(apres) {
        return false;
    }
    let signe_puis_chiffre =
        matches!(apres, Some('+') | Some('-')) && est_chiffre(chars.get(i + 2));
    !signe_puis_chiffre
}

fn substituer_constantes(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());

    for (i, &c) in chars.iter().enumerate() {
        match c {
            'π' => out.push_str(&format!("({})", std::f64::consts::PI)),
            'e' if est_constante_e(&chars, i) => {
                out.push_str(&format!("({})", std::f64::consts::E))
            }
            _ => out.push(c),
        }
    }
    out
}

/* ------------------------ Étape 3 : puissance ------------------------ */

/// Pas de raccourci "**" : après l’étape 1, "××" en serait un et doit rester une faute.
fn remplacer_puissance(s: &str) -> String {
    s.replace('²', "^2").replace('³', "^3")
}

/* ------------------------ Étapes 4-5 : suffixes ------------------------ */

/// Un '-' est unaire s’il ouvre le texte ou suit '(' / un opérateur.
fn moins_unaire(out: &str) -> bool {
    let mut it = out.chars().rev();
    if it.next() != Some('-') {
        return false;
    }
    match it.next() {
        None => true,
        Some(c) => matches!(c, '(' | '+' | '-' | '*' | '/' | '^'),
    }
}

/// Réécrit chaque `littéral` suivi de `suffixe` par `f(valeur)`.
///
/// `absorbe_signe` : un moins unaire juste avant le littéral fait partie de l’opérande
/// (utilisé par la factorielle : "-1!" => NaN).
fn reecrire_suffixe(
    s: &str,
    suffixe: char,
    absorbe_signe: bool,
    f: impl Fn(f64) -> String,
) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // un chiffre collé à une lettre/un chiffre/un point n’ouvre pas de littéral (log10, 1e5)
        let debut_possible = i == 0
            || !(chars[i - 1].is_ascii_alphanumeric() || chars[i - 1] == '_' || chars[i - 1] == '.');
        let fin = if debut_possible { fin_litteral(&chars, i) } else { i };

        if fin > i && chars.get(fin) == Some(&suffixe) {
            let lit: String = chars[i..fin].iter().collect();
            // un littéral lisible par fin_litteral se parse toujours (au pire en ∞)
            let mut x: f64 = lit.parse().unwrap_or(f64::INFINITY);

            if absorbe_signe && moins_unaire(&out) {
                out.pop();
                x = -x;
            }

            out.push_str(&f(x));
            i = fin + 1;
            continue;
        }

        if fin > i {
            out.extend(&chars[i..fin]);
            i = fin;
        } else {
            out.push(c);
            i += 1;
        }
    }

    out
}

/* ------------------------ Étape 7 : ×10^ ------------------------ */

fn developper_puissance_de_dix(s: &str) -> String {
    const MOTIF: &str = "*10^";

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        if !commence_par(&chars, i, MOTIF) {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        out.push_str(MOTIF);
        i += MOTIF.len();

        let signe = matches!(chars.get(i), Some('+') | Some('-'));
        let debut = i + usize::from(signe);
        let fin = fin_litteral(&chars, debut);

        // saisie en cours ("5*10^") : rien à envelopper
        if fin > debut {
            out.push('(');
            out.extend(&chars[i..fin]);
            out.push(')');
            i = fin;
        }
    }

    out
}

/// `motif` présent tel quel à partir de `i`.
pub(crate) fn commence_par(chars: &[char], i: usize, motif: &str) -> bool {
    motif
        .chars()
        .enumerate()
        .all(|(k, m)| chars.get(i + k) == Some(&m))
}
