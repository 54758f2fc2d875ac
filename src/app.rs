// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat, historique, reglages, vue)
// - Définir AppCalc (session + réglages) pour main.rs
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier (global, pas de champ texte) :
// - caractères utiles -> ajouter ; Enter -> "=" ; Backspace -> DEL ; Escape -> C

pub mod etat;
pub mod historique;
pub mod reglages;
pub mod vue;

use eframe::egui;

use etat::Session;
use reglages::Reglages;

pub struct AppCalc {
    pub session: Session,
    pub reglages: Reglages,
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            session: Session::new(reglages.unite_angle, reglages.capacite_historique),
            reglages,
        }
    }

    /// Caractère clavier -> texte affiché (glyphes de la calculatrice), ou None si ignoré.
    fn touche_clavier(c: char) -> Option<char> {
        match c {
            '*' => Some('×'),
            '/' => Some('÷'),
            '-' => Some('−'),
            ',' => Some('.'),
            '0'..='9' | '.' | '+' | '(' | ')' | '^' | '!' | '%' => Some(c),
            '×' | '÷' | '−' | 'π' | '√' => Some(c),
            c if c.is_ascii_alphabetic() => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }

    fn clavier(&mut self, ctx: &egui::Context) {
        let (texte, entree, retour, echap) = ctx.input(|i| {
            let texte: String = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .flat_map(|t| t.chars())
                .filter_map(Self::touche_clavier)
                .collect();
            (
                texte,
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if !texte.is_empty() {
            self.session.ajouter(&texte);
        }
        if retour {
            self.session.effacer_dernier();
        }
        if entree {
            self.session.valider();
        }
        if echap {
            self.session.effacer();
        }
    }
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // vue.rs
        });
    }
}
