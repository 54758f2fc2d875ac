//! src/app/etat.rs
//!
//! État de session (sans vue).
//!
//! Rôle : contenir l’expression saisie, le résultat affiché, la mémoire, les
//! bascules DEG/RAD et INV, l’historique ; offrir les commandes de la calculatrice.
//!
//! Contrats :
//! - Évaluation en direct après chaque saisie : erreurs avalées, jamais d’historique.
//! - "=" : seul chemin qui écrit l’historique et remplace l’expression.
//! - Aucune commande ne laisse la session dans un état irrécupérable (C ramène à "0").

use tracing::{debug, trace};

use super::historique::{Historique, CAPACITE_DEFAUT};
use crate::noyau::{calculer, formater, UniteAngle};

/// Motifs effacés d’un bloc par DEL (du plus long au plus court).
const JETONS_ATOMIQUES: &[&str] = &[
    "asin(", "acos(", "atan(", "sin(", "cos(", "tan(", "log(", "×10^", "ln(", "abs(", "√(",
];

#[derive(Clone, Debug)]
pub struct Session {
    // --- saisie ---
    pub expression: String,

    // --- affichage ---
    pub affichage: String,
    pub valeur_affichee: Option<f64>,
    pub erreur: bool,

    // --- registres / bascules ---
    pub memoire: f64,
    pub unite: UniteAngle,
    /// Bascule INV : libellé seulement, ne change pas les touches insérées.
    pub inverse: bool,

    pub historique: Historique,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(UniteAngle::default(), CAPACITE_DEFAUT)
    }
}

impl Session {
    pub fn new(unite: UniteAngle, capacite_historique: usize) -> Self {
        Self {
            expression: String::new(),
            affichage: "0".to_string(),
            valeur_affichee: Some(0.0),
            erreur: false,
            memoire: 0.0,
            unite,
            inverse: false,
            historique: Historique::new(capacite_historique),
        }
    }

    /* ------------------------ Saisie ------------------------ */

    pub fn ajouter(&mut self, jeton: &str) {
        self.expression.push_str(jeton);
        self.erreur = false;
        self.evaluer_en_direct();
    }

    /// DEL : retire un motif de fonction entier ("sin(", "×10^"...) sinon un caractère.
    pub fn effacer_dernier(&mut self) {
        match JETONS_ATOMIQUES
            .iter()
            .find(|m| self.expression.ends_with(*m))
        {
            Some(m) => {
                let reste = self.expression.len() - m.len();
                self.expression.truncate(reste);
            }
            None => {
                self.expression.pop();
            }
        }
        self.erreur = false;
        self.evaluer_en_direct();
    }

    /// C : expression vide, affichage "0".
    pub fn effacer(&mut self) {
        self.expression.clear();
        self.affichage = "0".to_string();
        self.valeur_affichee = Some(0.0);
        self.erreur = false;
    }

    /* ------------------------ Bascules ------------------------ */

    /// Pas de recalcul : la prochaine évaluation prend la nouvelle unité.
    pub fn basculer_unite(&mut self) {
        self.unite = self.unite.basculer();
    }

    pub fn basculer_inverse(&mut self) {
        self.inverse = !self.inverse;
    }

    /* ------------------------ "=" ------------------------ */

    pub fn valider(&mut self) {
        if self.expression.trim().is_empty() {
            return;
        }

        match calculer(&self.expression, self.unite) {
            Ok(v) => {
                let texte = formater(v);
                debug!(expression = %self.expression, resultat = %texte, "validation");
                self.historique.ajouter(self.expression.clone(), texte.clone());
                self.expression = texte.clone();
                self.affichage = texte;
                self.valeur_affichee = Some(v);
                self.erreur = false;
            }
            Err(e) => {
                debug!(expression = %self.expression, erreur = %e, "validation refusée");
                self.affichage.clear();
                self.valeur_affichee = None;
                self.erreur = true;
            }
        }
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MR : ajoute le registre à l’expression (s’il n’est pas nul).
    pub fn rappel_memoire(&mut self) {
        if self.memoire != 0.0 {
            let texte = formater(self.memoire);
            self.ajouter(&texte);
        }
    }

    pub fn memoire_plus(&mut self) {
        if let Some(v) = self.valeur_finie() {
            self.memoire += v;
        }
    }

    pub fn memoire_moins(&mut self) {
        if let Some(v) = self.valeur_finie() {
            self.memoire -= v;
        }
    }

    pub fn memoire_stocker(&mut self) {
        if let Some(v) = self.valeur_finie() {
            self.memoire = v;
        }
    }

    pub fn memoire_effacer(&mut self) {
        self.memoire = 0.0;
    }

    /* ------------------------ Historique ------------------------ */

    /// Reprend le résultat formaté d’une entrée comme nouvelle expression.
    /// `false` si l’index n’existe pas.
    pub fn utiliser_historique(&mut self, index: usize) -> bool {
        let Some(entree) = self.historique.get(index) else {
            return false;
        };
        let texte = entree.resultat.clone();

        self.valeur_affichee = calculer(&texte, self.unite).ok();
        self.expression = texte.clone();
        self.affichage = texte;
        self.erreur = false;
        true
    }

    /* ------------------------ Interne ------------------------ */

    /// Dernière valeur affichée, si elle est un nombre fini (pas de réévaluation).
    fn valeur_finie(&self) -> Option<f64> {
        self.valeur_affichee.filter(|v| v.is_finite())
    }

    fn evaluer_en_direct(&mut self) {
        if self.expression.is_empty() {
            self.affichage = "0".to_string();
            self.valeur_affichee = Some(0.0);
            return;
        }

        match calculer(&self.expression, self.unite) {
            Ok(v) => {
                self.affichage = formater(v);
                self.valeur_affichee = Some(v);
            }
            // saisie en cours : on garde le dernier affichage
            Err(e) => trace!(expression = %self.expression, erreur = %e, "direct"),
        }
    }
}
