//! Per-page SEO copy, keyed by canonical route key.

use crate::i18n::{Language, Localized};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Title and meta description of a static page.
#[derive(Debug, Clone)]
pub struct PageCopy {
    pub title: Localized<&'static str>,
    pub description: Localized<&'static str>,
}

static PAGE_COPY: OnceLock<HashMap<&'static str, PageCopy>> = OnceLock::new();

fn copy(
    title: (&'static str, &'static str, &'static str),
    description: (&'static str, &'static str, &'static str),
) -> PageCopy {
    PageCopy {
        title: Localized::new(title.0, title.1, title.2),
        description: Localized::new(description.0, description.1, description.2),
    }
}

fn page_copies() -> &'static HashMap<&'static str, PageCopy> {
    PAGE_COPY.get_or_init(|| {
        HashMap::from([
            (
                "",
                copy(
                    ("Chansons, jeux et activités pour enfants", "Songs, games and activities for kids", "Canciones, juegos y actividades para niños"),
                    (
                        "Des chansons, des jeux et des activités pour apprendre en s'amusant avec Lola et ses amis.",
                        "Songs, games and activities to learn while having fun with Lola and friends.",
                        "Canciones, juegos y actividades para aprender jugando con Lola y sus amigos.",
                    ),
                ),
            ),
            (
                "songs",
                copy(
                    ("Chansons", "Songs", "Canciones"),
                    (
                        "Écoutez et chantez les chansons de Lola et ses amis.",
                        "Listen and sing along to songs with Lola and friends.",
                        "Escucha y canta las canciones de Lola y sus amigos.",
                    ),
                ),
            ),
            (
                "games",
                copy(
                    ("Jeux", "Games", "Juegos"),
                    (
                        "Des jeux éducatifs gratuits pour les petits.",
                        "Free educational games for little ones.",
                        "Juegos educativos gratuitos para los más pequeños.",
                    ),
                ),
            ),
            (
                "games/lola-memory",
                copy(
                    ("Le memory de Lola", "Lola's Memory Game", "El memorama de Lola"),
                    (
                        "Retrouve les paires de cartes avec Lola.",
                        "Find the matching pairs of cards with Lola.",
                        "Encuentra las parejas de cartas con Lola.",
                    ),
                ),
            ),
            (
                "games/shark-rhythm",
                copy(
                    ("Le rythme du requin", "Shark Rhythm", "El ritmo del tiburón"),
                    (
                        "Attrape les notes au rythme de la chanson du requin.",
                        "Catch the notes to the beat of the shark song.",
                        "Atrapa las notas al ritmo de la canción del tiburón.",
                    ),
                ),
            ),
            (
                "characters",
                copy(
                    ("Personnages", "Characters", "Personajes"),
                    (
                        "Fais la connaissance de Lola et de tous ses amis.",
                        "Meet Lola and all of her friends.",
                        "Conoce a Lola y a todos sus amigos.",
                    ),
                ),
            ),
            (
                "activities",
                copy(
                    ("Activités", "Activities", "Actividades"),
                    (
                        "Coloriages, bricolages et fiches à imprimer.",
                        "Coloring pages, crafts and printables.",
                        "Dibujos para colorear, manualidades e imprimibles.",
                    ),
                ),
            ),
            (
                "colorings",
                copy(
                    ("Coloriages", "Coloring Pages", "Dibujos para colorear"),
                    (
                        "Des coloriages gratuits à imprimer.",
                        "Free printable coloring pages.",
                        "Dibujos para colorear gratis para imprimir.",
                    ),
                ),
            ),
            (
                "blog",
                copy(
                    ("Blog", "Blog", "Blog"),
                    (
                        "Conseils et idées pour les parents et les enseignants.",
                        "Tips and ideas for parents and teachers.",
                        "Consejos e ideas para padres y docentes.",
                    ),
                ),
            ),
            (
                "about",
                copy(
                    ("À propos", "About", "Sobre nosotros"),
                    (
                        "L'histoire de Lola et de l'équipe qui l'a créée.",
                        "The story of Lola and the team behind her.",
                        "La historia de Lola y del equipo que la creó.",
                    ),
                ),
            ),
            (
                "contact",
                copy(
                    ("Contact", "Contact", "Contacto"),
                    ("Écrivez-nous.", "Get in touch.", "Escríbenos."),
                ),
            ),
            (
                "privacy",
                copy(
                    ("Confidentialité", "Privacy Policy", "Privacidad"),
                    (
                        "Comment nous protégeons vos données.",
                        "How we protect your data.",
                        "Cómo protegemos tus datos.",
                    ),
                ),
            ),
        ])
    })
}

/// SEO copy for a canonical key, if the page has any.
pub fn page_copy(canonical_key: &str) -> Option<&'static PageCopy> {
    page_copies().get(canonical_key)
}

/// `"my-custom-article"` -> `"My custom article"`.
pub fn humanize_slug(slug: &str) -> String {
    let words = slug.replace(['-', '_'], " ");
    let mut chars = words.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Page title without the site suffix.
///
/// Known pages use their copy; dynamic pages use their last path segment.
pub fn page_title(canonical_key: &str, rest: Option<&str>, language: Language) -> String {
    if let Some(rest) = rest.filter(|rest| !rest.is_empty()) {
        let last = rest.rsplit('/').next().unwrap_or(rest);
        return humanize_slug(last);
    }
    match page_copy(canonical_key) {
        Some(copy) => copy.title.text(language).to_string(),
        None => humanize_slug(canonical_key),
    }
}

/// Meta description, falling back to the home page description.
pub fn page_description(canonical_key: &str, language: Language) -> String {
    page_copy(canonical_key)
        .or_else(|| page_copy(""))
        .map(|copy| copy.description.text(language).to_string())
        .unwrap_or_default()
}
