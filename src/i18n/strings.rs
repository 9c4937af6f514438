//! UI dictionaries, one flat key/value table per language.
//!
//! French is the reference dictionary: any key missing from English or
//! Spanish is served in French by [`translate`].

use crate::i18n::localized::with_french_fallback;
use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

// ==================== French Strings ====================

const FRENCH_STRINGS: &[(&str, &str)] = &[
    // Navigation
    ("nav.home", "Accueil"),
    ("nav.songs", "Chansons"),
    ("nav.games", "Jeux"),
    ("nav.characters", "Personnages"),
    ("nav.activities", "Activités"),
    ("nav.videos", "Vidéos"),
    ("nav.blog", "Blog"),
    ("nav.parents", "Parents"),
    ("nav.about", "À propos"),
    ("nav.contact", "Contact"),
    // Language switcher
    ("switcher.label", "Langue"),
    ("switcher.current", "Langue actuelle"),
    // Footer
    ("footer.privacy", "Confidentialité"),
    ("footer.terms", "Mentions légales"),
    ("footer.newsletter", "Infolettre"),
    ("footer.rights", "Tous droits réservés."),
    // Generic page copy
    ("page.notFound", "Page introuvable"),
    ("page.backHome", "Retour à l'accueil"),
    ("page.readMore", "Lire la suite"),
];

// ==================== English Strings ====================

const ENGLISH_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Home"),
    ("nav.songs", "Songs"),
    ("nav.games", "Games"),
    ("nav.characters", "Characters"),
    ("nav.activities", "Activities"),
    ("nav.videos", "Videos"),
    ("nav.blog", "Blog"),
    ("nav.parents", "Parents"),
    ("nav.about", "About"),
    ("nav.contact", "Contact"),
    ("switcher.label", "Language"),
    ("switcher.current", "Current language"),
    ("footer.privacy", "Privacy"),
    ("footer.terms", "Terms"),
    ("footer.newsletter", "Newsletter"),
    ("footer.rights", "All rights reserved."),
    ("page.notFound", "Page not found"),
    ("page.backHome", "Back to home"),
    ("page.readMore", "Read more"),
];

// ==================== Spanish Strings ====================

const SPANISH_STRINGS: &[(&str, &str)] = &[
    ("nav.home", "Inicio"),
    ("nav.songs", "Canciones"),
    ("nav.games", "Juegos"),
    ("nav.characters", "Personajes"),
    ("nav.activities", "Actividades"),
    ("nav.videos", "Videos"),
    ("nav.blog", "Blog"),
    ("nav.parents", "Padres"),
    ("nav.about", "Sobre nosotros"),
    ("nav.contact", "Contacto"),
    ("switcher.label", "Idioma"),
    ("switcher.current", "Idioma actual"),
    ("footer.privacy", "Privacidad"),
    ("footer.terms", "Términos"),
    // footer.newsletter: not translated yet
    ("footer.rights", "Todos los derechos reservados."),
    ("page.notFound", "Página no encontrada"),
    ("page.backHome", "Volver al inicio"),
    ("page.readMore", "Leer más"),
];

type Dictionary = HashMap<&'static str, &'static str>;

static DICTIONARIES: OnceLock<[Dictionary; 3]> = OnceLock::new();

fn dictionaries() -> &'static [Dictionary; 3] {
    DICTIONARIES.get_or_init(|| {
        [
            FRENCH_STRINGS.iter().copied().collect(),
            ENGLISH_STRINGS.iter().copied().collect(),
            SPANISH_STRINGS.iter().copied().collect(),
        ]
    })
}

fn dictionary(language: Language) -> &'static Dictionary {
    &dictionaries()[language as usize]
}

/// Look up `key` for `language`.
///
/// Falls back to the French value, then to `key` itself. Never fails.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    let active = dictionary(language).get(key).copied();
    let french = dictionary(Language::Fr).get(key).copied();
    with_french_fallback(active, french).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_active_language() {
        assert_eq!(translate(Language::En, "nav.songs"), "Songs");
        assert_eq!(translate(Language::Es, "nav.songs"), "Canciones");
        assert_eq!(translate(Language::Fr, "nav.songs"), "Chansons");
    }

    #[test]
    fn test_translate_falls_back_to_french() {
        assert_eq!(translate(Language::Es, "footer.newsletter"), "Infolettre");
    }

    #[test]
    fn test_translate_unknown_key_returns_key() {
        assert_eq!(translate(Language::En, "does.not.exist"), "does.not.exist");
        assert_eq!(translate(Language::Fr, ""), "");
    }

    #[test]
    fn test_french_dictionary_is_the_superset() {
        let french = dictionary(Language::Fr);
        for language in [Language::En, Language::Es] {
            for key in dictionary(language).keys() {
                assert!(french.contains_key(key), "{} missing from French", key);
            }
        }
    }

    #[test]
    fn test_no_duplicate_keys_in_sources() {
        for source in [FRENCH_STRINGS, ENGLISH_STRINGS, SPANISH_STRINGS] {
            let unique: std::collections::HashSet<_> = source.iter().map(|(k, _)| k).collect();
            assert_eq!(unique.len(), source.len());
        }
    }
}
