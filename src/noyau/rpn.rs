// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name ∈ liste blanche (Fonction::depuis_nom) => fonction unaire, suivie de '('
//    - sinon => erreur de syntaxe (pas de variables)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur => Tok::Neg (préfixe)
//    - précédence Neg > ^ > * / > + -  (donc -2^2 = (-2)^2 = 4)
// - Plus unaire : ignoré
// - Multiplication implicite:
//    - valeur suivie d’un nombre, de '(' ou d’une fonction => '*' injecté ("2(3)", "2sin(30)")

use super::erreur::ErreurCalcul;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        Tok::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

/// Dépile selon précédence/associativité, puis empile l’opérateur binaire `tok`.
fn pousser_operateur(tok: Tok, ops: &mut Vec<Tok>, out: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        // on ne traverse ni '(' ni une fonction (fonction reste collée à son argument)
        if matches!(top, Tok::LPar | Tok::Ident(_)) {
            break;
        }

        let p_top = precedence(top);
        let p_tok = precedence(&tok);

        let doit_pop = if is_right_associative(&tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if !doit_pop {
            break;
        }
        if let Some(op) = ops.pop() {
            out.push(op);
        }
    }

    ops.push(tok);
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Num(1), Slash, Num(2), RPar]
///   rpn:    [Num(1), Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire et la multiplication implicite.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    pousser_operateur(Tok::Star, &mut ops, &mut out);
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if !is_fonction_ident(&name) {
                    return Err(ErreurCalcul::syntaxe(format!("identifiant inconnu: {name}")));
                }
                if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(ErreurCalcul::syntaxe(format!("'(' attendue après {name}")));
                }
                if prev_was_value {
                    pousser_operateur(Tok::Star, &mut ops, &mut out);
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                if prev_was_value {
                    pousser_operateur(Tok::Star, &mut ops, &mut out);
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("valeur manquante avant ')'"));
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err(ErreurCalcul::syntaxe("')' sans '(' correspondante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if matches!(ops.last(), Some(Tok::Ident(_))) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // préfixe : rien à dépiler (aucun opérande encore)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurCalcul::syntaxe("opérateur sans opérande gauche"));
                }
                pousser_operateur(tok, &mut ops, &mut out);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurCalcul::syntaxe("jeton interne inattendu")),
        }
    }

    if !prev_was_value {
        return Err(ErreurCalcul::syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurCalcul> {
    let invalide = || ErreurCalcul::syntaxe("expression invalide");
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),

            Tok::Neg => {
                let a = st.pop().ok_or_else(invalide)?;
                st.push(Expr::Neg(Box::new(a)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or_else(invalide)?);
                let a = Box::new(st.pop().ok_or_else(invalide)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };
                st.push(e);
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(&name)
                    .ok_or_else(|| ErreurCalcul::syntaxe(format!("identifiant inconnu: {name}")))?;
                let x = st.pop().ok_or_else(|| ErreurCalcul::syntaxe("fonction sans argument"))?;
                st.push(Expr::Fonction(f, Box::new(x)));
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(invalide()),
    }
}
