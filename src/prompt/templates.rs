//! Fixed Polish wording of the definition request.

/// Marker used in place of a missing definition.
pub const NO_DEFINITION: &str = "brak definicji";

/// Header of the block listing relations from the target to other senses.
pub const OUTGOING_HEADER: &str = "Relacje tego słowa z innymi słowami:\n";

/// Header of the block listing relations from other senses to the target.
pub const INCOMING_HEADER: &str = "\nRelacje innych słów z tym słowem:\n";

/// Opening sentence naming the word that lacks a definition.
pub fn opening(word: &str) -> String {
    format!(
        "Mam słowo '{}' dla którego nie mam definicji, ale mam relacje, które łączą to słowo z innymi. ",
        word
    )
}

/// Instructions describing the expected definition.
pub fn instructions(word_limit: usize) -> String {
    format!(
        "\nPodaj definicję mojego słowa. Weź pod uwagę podane relacje i podaj definicję związaną z podanymi relacjami. \
         Postaraj się użyć nie więcej niż {} słów. \
         W definicji nie powinno być słowa, które jest definiowane. \
         Definicja powinna mieć formę <słowo> : <definicja>\n",
        word_limit
    )
}

/// One line describing a related sense.
pub fn relation_entry(relation: &str, word: &str, definition: Option<&str>) -> String {
    format!(
        "typ relacji: {}, słowo: {}, {}",
        relation,
        word,
        definition.unwrap_or(NO_DEFINITION)
    )
}
