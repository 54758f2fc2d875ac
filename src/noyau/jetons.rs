// src/noyau/jetons.rs

use super::erreur::ErreurCalcul;

/// Garde-fou : au-delà, on refuse (profondeur d’AST bornée, pas de gel).
const MAX_JETONS: usize = 4096;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions (sin, log10, rad, ...) : rpn.rs vérifie la liste blanche.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Interne : moins unaire, produit seulement par rpn.rs
    Neg,

    LPar,
    RPar,
}

/// Tokenize un texte canonique en jetons.
/// Supporte:
/// - décimaux (12, 1.5, .5, 5.)
/// - exposant collé (1.2e+20, 3e-7, 2E5)
/// - NaN / inf (produits par la factorielle du normaliseur)
/// - opérateurs + - * / ^ et parenthèses
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if out.len() > MAX_JETONS {
            return Err(ErreurCalcul::syntaxe("expression trop longue"));
        }

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect::<String>().to_lowercase();

            match word.as_str() {
                "nan" => out.push(Tok::Num(f64::NAN)),
                "inf" => out.push(Tok::Num(f64::INFINITY)),
                _ => out.push(Tok::Ident(word)),
            }
            continue;
        }

        // Nombre décimal
        let point_puis_chiffre =
            c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit());
        if c.is_ascii_digit() || point_puis_chiffre {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            if i < chars.len() && chars[i] == '.' {
                i += 1;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }
            i = fin_exposant(&chars, i);

            let txt: String = chars[start..i].iter().collect();
            // "1.2.3" : deuxième point refusé
            if chars.get(i) == Some(&'.') {
                return Err(ErreurCalcul::syntaxe(format!("nombre invalide: {txt}.")));
            }
            let v = txt
                .parse::<f64>()
                .map_err(|_| ErreurCalcul::syntaxe(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalcul::syntaxe(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Exposant collé à un nombre : e5, e+20, E-3. Sinon on ne bouge pas
/// (un "e" seul sera lu comme identifiant puis refusé).
fn fin_exposant(chars: &[char], i: usize) -> usize {
    if !matches!(chars.get(i), Some('e') | Some('E')) {
        return i;
    }
    let mut j = i + 1;
    if matches!(chars.get(j), Some('+') | Some('-')) {
        j += 1;
    }
    if !chars.get(j).is_some_and(|d| d.is_ascii_digit()) {
        return i;
    }
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    j
}

/// Format utilitaire (journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
