//! Event title and location derived from an entry's text

use crate::rules::Rules;

/// Clean title of an entry
///
/// Only the first line carries the title. Group tags are replaced by a
/// canonical suffix, time ranges and rooms are removed, and anything after
/// an alternative-text marker is dropped. May be empty when the entry holds
/// nothing but structure.
pub fn summary(rules: &Rules, text: &str) -> String {
    let cleaned = rules.strip_boilerplate(text);
    let first_line = cleaned.lines().next().unwrap_or("");

    let mut title = rules.group.replace_all(first_line, "").into_owned();
    if let Some(suffix) = rules.group_suffix(text) {
        title.truncate(title.trim_end().len());
        title.push(' ');
        title.push_str(&suffix);
    }

    let title = rules.time_range.replace_all(&title, "");
    let title = rules.location.replace_all(&title, "");

    rules.cut_alternatives(&title).trim().to_string()
}

/// Room or amphitheater named anywhere in an entry
///
/// The location pattern has alternative branches; the last capture group that
/// matched something is the room itself.
pub fn location(rules: &Rules, text: &str) -> Option<String> {
    let caps = rules.location.captures(text)?;

    (1..caps.len())
        .rev()
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn rules() -> Rules {
        Rules::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_plain_title_and_room() {
        let rules = rules();
        assert_eq!(summary(&rules, "Algo\nSalle A101"), "Algo");
        assert_eq!(location(&rules, "Algo\nSalle A101").as_deref(), Some("A101"));
    }

    #[test]
    fn test_group_suffix_in_title() {
        let rules = rules();
        let text = "TD Algo \nGr 1 salle A101";

        assert_eq!(summary(&rules, text), "TD Algo (Gr. 1)");
        assert_eq!(location(&rules, text).as_deref(), Some("A101"));
    }

    #[test]
    fn test_time_and_alternatives_removed() {
        let rules = rules();
        assert_eq!(summary(&rules, "Compilation 14h00-16h00 + TP"), "Compilation");
        assert_eq!(summary(&rules, "Réseaux - rattrapage éventuel"), "Réseaux");
    }

    #[test]
    fn test_boilerplate_removed() {
        let rules = rules();
        assert_eq!(summary(&rules, "Option : Cryptographie\nSalle B204"), "Cryptographie");
    }

    #[test]
    fn test_amphitheater_location() {
        let rules = rules();
        let text = "Conférence\nGrand amphi";

        assert_eq!(summary(&rules, text), "Conférence");
        assert_eq!(location(&rules, text).as_deref(), Some("Grand amphi"));
    }

    #[test]
    fn test_structural_entry_gives_empty_title() {
        let rules = rules();
        assert_eq!(summary(&rules, "Salle A101"), "");
        assert_eq!(location(&rules, "Algo"), None);
    }
}
