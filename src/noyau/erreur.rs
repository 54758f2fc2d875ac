// src/noyau/erreur.rs
//
// Taxonomie d’erreurs du noyau.
// - Syntaxe : texte canonique que le parseur ne sait pas structurer
// - Domaine : opération indéfinie (√ négative, division par zéro, NaN/∞ final)
//
// La saturation de la factorielle (> 170 → ∞) n’est PAS une erreur ici :
// elle devient une erreur Domaine seulement si l’infini atteint le résultat final.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    #[error("syntaxe: {0}")]
    Syntaxe(String),

    #[error("domaine: {0}")]
    Domaine(String),
}

impl ErreurCalcul {
    pub fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }

    pub fn domaine(msg: impl Into<String>) -> Self {
        Self::Domaine(msg.into())
    }
}
