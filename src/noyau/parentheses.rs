// src/noyau/parentheses.rs
//
// Équilibrage des parenthèses (sur le texte DÉJÀ normalisé)
// ---------------------------------------------------------
// But : une saisie en cours ("sin(30", "2×(3+") doit donner une valeur provisoire.
//
// Règle : on ajoute (ouvertes - fermées) fois ')' si c’est positif, sinon rien.
//
// Mode degrés : chaque enveloppe "rad(" porte sa propre '(' dans le texte, et la ')'
// de l’utilisateur qui ferme sin(/cos(/tan( ferme déjà l’enveloppe (trig.rs).
// Une enveloppe encore ouverte est donc comptée comme une '(' de plus : pas de
// correction séparée par unité.
//
// Un texte déjà équilibré reste identique (idempotence). Les ')' en trop ne sont
// jamais retirées : le parse échouera.

use super::trig::UniteAngle;

pub fn equilibrer(canonique: &str, _unite: UniteAngle) -> String {
    let ouvertes = canonique.chars().filter(|&c| c == '(').count();
    let fermees = canonique.chars().filter(|&c| c == ')').count();
    let manque = ouvertes.saturating_sub(fermees);

    let mut out = String::with_capacity(canonique.len() + manque);
    out.push_str(canonique);
    for _ in 0..manque {
        out.push(')');
    }
    out
}
