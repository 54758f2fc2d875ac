//! src/app/historique.rs
//!
//! Historique borné des calculs validés (plus récent en tête).
//!
//! Contrats :
//! - Une entrée n’est jamais modifiée après création.
//! - Au-delà de la capacité, la plus ancienne est évincée.

use std::collections::VecDeque;

/// Capacité par défaut (surchargée par les réglages).
pub const CAPACITE_DEFAUT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntreeHistorique {
    /// Expression telle qu’affichée au moment du "=".
    pub expression: String,
    /// Résultat formaté (celui qui est réutilisé).
    pub resultat: String,
}

#[derive(Clone, Debug)]
pub struct Historique {
    entrees: VecDeque<EntreeHistorique>,
    capacite: usize,
}

impl Default for Historique {
    fn default() -> Self {
        Self::new(CAPACITE_DEFAUT)
    }
}

impl Historique {
    /// Capacité minimale 1 (0 rendrait l’historique inutilisable).
    pub fn new(capacite: usize) -> Self {
        let capacite = capacite.max(1);
        Self {
            entrees: VecDeque::with_capacity(capacite + 1),
            capacite,
        }
    }

    pub fn ajouter(&mut self, expression: impl Into<String>, resultat: impl Into<String>) {
        self.entrees.push_front(EntreeHistorique {
            expression: expression.into(),
            resultat: resultat.into(),
        });
        self.entrees.truncate(self.capacite);
    }

    /// Parcours du plus récent au plus ancien.
    pub fn iter(&self) -> impl Iterator<Item = &EntreeHistorique> {
        self.entrees.iter()
    }

    pub fn get(&self, index: usize) -> Option<&EntreeHistorique> {
        self.entrees.get(index)
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    pub fn capacite(&self) -> usize {
        self.capacite
    }
}
