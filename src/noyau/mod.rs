//! Noyau de calcul scientifique (f64)
//!
//! Organisation interne :
//! - normalise.rs   : notation affichée -> forme canonique (glyphes, π/e, !, %, ×10^)
//! - trig.rs        : unité d’angle + réécriture des fonctions (enveloppe degrés)
//! - parentheses.rs : fermeture automatique des groupes ouverts
//! - jetons.rs      : tokenisation
//! - rpn.rs         : shunting-yard + construction Expr
//! - expr.rs        : AST numérique + liste blanche de fonctions
//! - eval.rs        : pipeline complet
//! - format.rs      : affichage borné (entier / fixe / exponentiel)
//! - erreur.rs      : syntaxe vs domaine

pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod normalise;
pub mod parentheses;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalcul;
pub use eval::{calculer, evaluer, Evaluation};
pub use format::formater;
pub use normalise::normaliser;
pub use parentheses::equilibrer;
pub use trig::UniteAngle;
