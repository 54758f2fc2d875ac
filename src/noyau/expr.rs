// src/noyau/expr.rs
//
// AST numérique (f64).
// - Nombre : littéral
// - Neg    : moins unaire
// - Fonction : appel unaire sur liste blanche (pas de code arbitraire)
//
// IMPORTANT (SAFE):
// - evaluer() ne panique jamais : domaine invalide => ErreurCalcul::Domaine
// - NaN/∞ final est refusé plus haut (eval.rs)

use super::erreur::ErreurCalcul;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Sqrt,
    Abs,
    // interne : degrés -> radians (enveloppe du normaliseur)
    Rad,
}

impl Fonction {
    /// Liste blanche : nom canonique -> fonction.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        let f = match nom {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" => Fonction::Asin,
            "acos" => Fonction::Acos,
            "atan" => Fonction::Atan,
            "log10" => Fonction::Log10,
            "ln" => Fonction::Ln,
            "sqrt" => Fonction::Sqrt,
            "abs" => Fonction::Abs,
            "rad" => Fonction::Rad,
            _ => return None,
        };
        Some(f)
    }

    pub fn appliquer(self, x: f64) -> Result<f64, ErreurCalcul> {
        use Fonction::*;

        let v = match self {
            Sin => x.sin(),
            Cos => x.cos(),
            Tan => x.tan(),
            Asin | Acos if !(-1.0..=1.0).contains(&x) => {
                return Err(ErreurCalcul::domaine("asin/acos hors de [-1, 1]"))
            }
            Asin => x.asin(),
            Acos => x.acos(),
            Atan => x.atan(),
            Log10 | Ln if x <= 0.0 => {
                return Err(ErreurCalcul::domaine("logarithme d’un nombre non positif"))
            }
            Log10 => x.log10(),
            Ln => x.ln(),
            Sqrt if x < 0.0 => return Err(ErreurCalcul::domaine("√ : argument négatif")),
            Sqrt => x.sqrt(),
            Abs => x.abs(),
            Rad => x.to_radians(),
        };
        Ok(v)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Fonction(Fonction, Box<Expr>),
}

impl Expr {
    /// Évaluation récursive (profondeur bornée par MAX_JETONS côté jetons.rs).
    pub fn evaluer(&self) -> Result<f64, ErreurCalcul> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Neg(a) => Ok(-a.evaluer()?),

            Add(a, b) => Ok(a.evaluer()? + b.evaluer()?),
            Sub(a, b) => Ok(a.evaluer()? - b.evaluer()?),
            Mul(a, b) => Ok(a.evaluer()? * b.evaluer()?),

            Div(a, b) => {
                let na = a.evaluer()?;
                let nb = b.evaluer()?;
                if nb == 0.0 {
                    return Err(ErreurCalcul::domaine("division par zéro"));
                }
                Ok(na / nb)
            }

            // powf est O(1) : pas de boucle à borner ; un débordement donne ∞ (refusé plus haut)
            Pow(a, b) => Ok(a.evaluer()?.powf(b.evaluer()?)),

            Expr::Fonction(f, x) => f.appliquer(x.evaluer()?),
        }
    }
}
