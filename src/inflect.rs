//! English inflection for type names: plural/singular forms, underscore, demodulize, and the
//! derived route name forms of a model (`ModelName`).

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules(defs: &[(&str, &'static str)]) -> Vec<Rule> {
    defs.iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(&format!("(?i){}", pattern))
                .ok()
                .map(|pattern| Rule { pattern, replacement })
        })
        .collect()
}

/// Plural rules in definition order; later rules take precedence.
const PLURAL_RULES: &[(&str, &str)] = &[
    ("$", "s"),
    ("s$", "s"),
    ("^(ax|test)is$", "${1}es"),
    ("(octop|vir)us$", "${1}i"),
    ("(octop|vir)i$", "${1}i"),
    ("(alias|status)$", "${1}es"),
    ("(bu)s$", "${1}ses"),
    ("(buffal|tomat)o$", "${1}oes"),
    ("([ti])um$", "${1}a"),
    ("([ti])a$", "${1}a"),
    ("sis$", "ses"),
    ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    ("(hive)$", "${1}s"),
    ("([^aeiouy]|qu)y$", "${1}ies"),
    ("(x|ch|ss|sh)$", "${1}es"),
    ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    ("^(m|l)ouse$", "${1}ice"),
    ("^(m|l)ice$", "${1}ice"),
    ("^(ox)$", "${1}en"),
    ("^(oxen)$", "${1}"),
    ("(quiz)$", "${1}zes"),
];

/// Singular rules in definition order; later rules take precedence.
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("s$", ""),
    ("(ss)$", "${1}"),
    ("(n)ews$", "${1}ews"),
    ("([ti])a$", "${1}um"),
    ("((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
    ("(^analy)(sis|ses)$", "${1}sis"),
    ("([^f])ves$", "${1}fe"),
    ("(hive)s$", "${1}"),
    ("(tive)s$", "${1}"),
    ("([lr])ves$", "${1}f"),
    ("([^aeiouy]|qu)ies$", "${1}y"),
    ("(s)eries$", "${1}eries"),
    ("(m)ovies$", "${1}ovie"),
    ("(x|ch|ss|sh)es$", "${1}"),
    ("^(m|l)ice$", "${1}ouse"),
    ("(bus)(es)?$", "${1}"),
    ("(o)es$", "${1}"),
    ("(shoe)s$", "${1}"),
    ("(cris|test)(is|es)$", "${1}is"),
    ("^(a)x[ie]s$", "${1}xis"),
    ("(octop|vir)(us|i)$", "${1}us"),
    ("(alias|status)(es)?$", "${1}"),
    ("^(ox)en", "${1}"),
    ("(vert|ind)ices$", "${1}ex"),
    ("(matr)ices$", "${1}ix"),
    ("(quiz)zes$", "${1}"),
    ("(database)s$", "${1}"),
];

static PLURALS: LazyLock<Vec<Rule>> = LazyLock::new(|| rules(PLURAL_RULES));
static SINGULARS: LazyLock<Vec<Rule>> = LazyLock::new(|| rules(SINGULAR_RULES));

const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// Last word of a snake_case or path-like identifier.
fn last_word(word: &str) -> &str {
    word.rsplit(['_', '/']).next().unwrap_or(word)
}

fn inflect(word: &str, rules: &[Rule], to_plural: bool) -> String {
    if word.is_empty() || UNCOUNTABLES.contains(&last_word(word).to_lowercase().as_str()) {
        return word.to_string();
    }
    let tail = last_word(word);
    let head = &word[..word.len() - tail.len()];
    for (singular, plural) in IRREGULARS {
        let (from, to) = if to_plural { (singular, plural) } else { (plural, singular) };
        if tail.eq_ignore_ascii_case(from) || tail.eq_ignore_ascii_case(to) {
            // keep the caller's leading case
            let mut out = String::with_capacity(head.len() + to.len());
            out.push_str(head);
            let mut chars = to.chars();
            if let (Some(first), Some(orig)) = (chars.next(), tail.chars().next()) {
                if orig.is_uppercase() {
                    out.extend(first.to_uppercase());
                } else {
                    out.push(first);
                }
                out.push_str(chars.as_str());
            }
            return out;
        }
    }
    for rule in rules.iter().rev() {
        if rule.pattern.is_match(word) {
            return rule.pattern.replace(word, rule.replacement).into_owned();
        }
    }
    word.to_string()
}

/// Plural form of the last word: "comment" -> "comments", "blogging/category" -> "blogging/categories".
pub fn pluralize(word: &str) -> String {
    inflect(word, &PLURALS, true)
}

/// Singular form of the last word: "nested_comments" -> "nested_comment".
pub fn singularize(word: &str) -> String {
    inflect(word, &SINGULARS, false)
}

static ACRONYM_BOUNDARY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("([A-Z\\d]+)([A-Z][a-z])").ok());
static WORD_BOUNDARY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("([a-z\\d])([A-Z])").ok());

/// Convert a type path to snake_case with `/` between namespaces.
/// e.g. "Blogging::PostComment" -> "blogging/post_comment", "HTTPRequest" -> "http_request"
pub fn underscore(type_name: &str) -> String {
    let mut s = type_name.replace("::", "/");
    if let Some(re) = ACRONYM_BOUNDARY.as_ref() {
        s = re.replace_all(&s, "${1}_${2}").into_owned();
    }
    if let Some(re) = WORD_BOUNDARY.as_ref() {
        s = re.replace_all(&s, "${1}_${2}").into_owned();
    }
    s.replace('-', "_").to_lowercase()
}

/// Innermost name of a type path: "Blogging::Comment" -> "Comment".
pub fn demodulize(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// Whether `type_name` is a well-formed type path (`Name` or `Ns::Name`, each segment `[A-Z][A-Za-z0-9]*`).
pub fn is_type_path(type_name: &str) -> bool {
    !type_name.is_empty()
        && type_name.split("::").all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_uppercase()) && chars.all(|c| c.is_ascii_alphanumeric())
        })
}

/// Derived name forms of a model type, used for route names, paths and params.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelName {
    /// Type path as registered, e.g. "Blogging::Comment".
    pub name: String,
    /// "blogging_comment"
    pub singular: String,
    /// "blogging_comments"
    pub plural: String,
    /// "comment"
    pub element: String,
    /// "blogging/comments"
    pub collection: String,
    /// Collection helper base; plural, or `<plural>_index` when plural and singular coincide.
    pub route_key: String,
    /// "blogging_comment"
    pub singular_route_key: String,
}

impl ModelName {
    pub fn new(type_name: &str) -> Self {
        let underscored = underscore(type_name);
        let singular = underscored.replace('/', "_");
        let plural = pluralize(&singular);
        let route_key = if plural == singular { format!("{}_index", plural) } else { plural.clone() };
        ModelName {
            name: type_name.to_string(),
            element: underscore(demodulize(type_name)),
            collection: pluralize(&underscored),
            singular_route_key: singular.clone(),
            singular,
            plural,
            route_key,
        }
    }

    /// Plural of the innermost name only: "Blogging::Comment" -> "comments".
    pub fn demodulized_plural(&self) -> String {
        pluralize(&self.element)
    }

    /// Path of a singular resource: "Blogging::Profile" -> "blogging/profile".
    pub fn singular_path(&self) -> String {
        underscore(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_compiles() {
        assert_eq!(PLURALS.len(), PLURAL_RULES.len());
        assert_eq!(SINGULARS.len(), SINGULAR_RULES.len());
        assert!(ACRONYM_BOUNDARY.is_some());
        assert!(WORD_BOUNDARY.is_some());
    }

    #[test]
    fn pluralizes_regular_and_rule_based_words() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("wife"), "wives");
        assert_eq!(pluralize("blogging/comment"), "blogging/comments");
        assert_eq!(pluralize("post_metadata"), "post_metadata");
        assert_eq!(pluralize("matrix"), "matrices");
    }

    #[test]
    fn irregular_and_uncountable_words() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("Child"), "Children");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(pluralize("farm_equipment"), "farm_equipment");
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("series"), "series");
    }

    #[test]
    fn singularizes() {
        assert_eq!(singularize("nested_comments"), "nested_comment");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("post_metadata"), "post_metadatum");
    }

    #[test]
    fn underscores_type_paths() {
        assert_eq!(underscore("Blogging::PostComment"), "blogging/post_comment");
        assert_eq!(underscore("HTTPRequest"), "http_request");
        assert_eq!(underscore("Post2Fa"), "post2_fa");
        assert_eq!(demodulize("Blogging::Comment"), "Comment");
    }

    #[test]
    fn validates_type_paths() {
        assert!(is_type_path("Post"));
        assert!(is_type_path("Blogging::Comment"));
        assert!(!is_type_path(""));
        assert!(!is_type_path("post"));
        assert!(!is_type_path("Blogging::"));
        assert!(!is_type_path("Blog Post"));
    }

    #[test]
    fn model_name_forms() {
        let name = ModelName::new("Blogging::Comment");
        assert_eq!(name.singular, "blogging_comment");
        assert_eq!(name.plural, "blogging_comments");
        assert_eq!(name.element, "comment");
        assert_eq!(name.collection, "blogging/comments");
        assert_eq!(name.route_key, "blogging_comments");
        assert_eq!(name.demodulized_plural(), "comments");
        assert_eq!(name.singular_path(), "blogging/comment");

        let sheep = ModelName::new("Sheep");
        assert_eq!(sheep.route_key, "sheep_index");
        assert_eq!(sheep.singular_route_key, "sheep");
    }
}
