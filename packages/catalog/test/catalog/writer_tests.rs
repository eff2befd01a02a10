/**
 * Catalog Writer Tests
 *
 * Catalog → markup: document shell, child and attribute order, escaping
 * symmetry, and round-trip stability.
 */

#[cfg(test)]
mod tests {
    use linguist_catalog::{
        parse, serialize, Catalog, Context, Location, Message, MessageStatus, Translation,
    };

    const EXAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" sourcelanguage="en" language="sv_SE">
    <context>
        <name>kernel/navigationpart</name>
        <message>
            <source>Newsletter</source>
            <translation>Nyhetsbrev</translation>
        </message>
        <message>
            <source>vztnewsletter</source>
            <comment>Navigation part</comment>
            <translation>vztnewsletter2</translation>
        </message>
        <message numerus="yes">
            <source>%1 takes at most %n argument(s). %2 is therefore invalid.</source>
            <translation>
                <numerusform>%1 prend au maximum %n argument. %2 est donc invalide.</numerusform>
                <numerusform>%1 prend au maximum %n arguments. %2 est donc invalide.</numerusform>
            </translation>
        </message>
    </context>
    <context>
        <name></name>
        <message>
            <source>%1 e-mail(s) bounced back</source>
            <translation>%1 e-post adresser er ugyldige</translation>
        </message>
    </context>
</TS>
"#;

    fn message(source: &str, translation: Translation) -> Message {
        let mut message = Message::new(source);
        message.translation = translation;
        message
    }

    fn single_context_catalog(messages: Vec<Message>) -> Catalog {
        Catalog {
            version: Some("2.1".to_string()),
            source_language: None,
            language: None,
            contexts: vec![Context {
                name: "ctx".to_string(),
                messages,
            }],
        }
    }

    #[test]
    fn serializes_the_document_shell() {
        let catalog = Catalog {
            version: Some("2.1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serialize(&catalog),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\"/>\n"
        );
    }

    #[test]
    fn round_trip_is_byte_stable_on_pretty_printed_input() {
        let outcome = parse(EXAMPLE, "example.ts").expect("parsable");
        assert_eq!(serialize(&outcome.catalog), EXAMPLE);
    }

    #[test]
    fn escaping_is_symmetric() {
        let mut m = message("a < b & c > d", Translation::single("x \"y\" & 'z'"));
        m.comment = Some("5 < 6".to_string());
        let catalog = single_context_catalog(vec![m]);

        let markup = serialize(&catalog);
        let outcome = parse(&markup, "test.ts").expect("parsable");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.catalog, catalog);
    }

    #[test]
    fn writes_status_as_the_type_attribute() {
        let mut unfinished = message("a", Translation::single(""));
        unfinished.status = MessageStatus::Unfinished;
        let mut obsolete = message("b", Translation::single("old"));
        obsolete.status = MessageStatus::Obsolete;
        let mut vanished = message("c", Translation::single("gone"));
        vanished.status = MessageStatus::Vanished;
        let catalog =
            single_context_catalog(vec![unfinished, obsolete, vanished, message("d", Translation::single("done"))]);

        let markup = serialize(&catalog);
        assert!(markup.contains("<translation type=\"unfinished\"></translation>"));
        assert!(markup.contains("<translation type=\"obsolete\">old</translation>"));
        assert!(markup.contains("<translation type=\"vanished\">gone</translation>"));
        assert!(markup.contains("<translation>done</translation>"));

        let outcome = parse(&markup, "test.ts").expect("parsable");
        assert_eq!(outcome.catalog, catalog);
    }

    #[test]
    fn writes_plural_messages_with_the_numerus_flag() {
        let catalog = single_context_catalog(vec![message(
            "%n file(s)",
            Translation::plural(["en fil", "%n filer"]),
        )]);

        let markup = serialize(&catalog);
        assert!(markup.contains("<message numerus=\"yes\">"));
        assert!(markup.contains("<numerusform>en fil</numerusform>"));
        assert!(markup.contains("<numerusform>%n filer</numerusform>"));

        let outcome = parse(&markup, "test.ts").expect("parsable");
        assert_eq!(outcome.catalog, catalog);
    }

    #[test]
    fn writes_an_empty_plural_translation_as_an_empty_block() {
        let mut m = message("%n item(s)", Translation::plural(Vec::<String>::new()));
        m.status = MessageStatus::Unfinished;
        m.incomplete = true;
        let catalog = single_context_catalog(vec![m]);

        let markup = serialize(&catalog);
        assert!(markup.contains("<translation type=\"unfinished\"></translation>"));

        let outcome = parse(&markup, "test.ts").expect("parsable");
        assert_eq!(outcome.catalog, catalog);
    }

    #[test]
    fn round_trips_ids_locations_and_carrier_comments() {
        let mut m = message("s", Translation::single("t"));
        m.id = Some("m1".to_string());
        m.locations = vec![
            Location {
                filename: Some("a.cpp".to_string()),
                line: Some(12),
            },
            Location {
                filename: Some("a.cpp".to_string()),
                line: Some(371),
            },
        ];
        m.comment = Some(String::new());
        m.extracomment = Some("developer note".to_string());
        m.translatorcomment = Some("translator note".to_string());
        let catalog = single_context_catalog(vec![m]);

        let markup = serialize(&catalog);
        assert!(markup.contains("<message id=\"m1\">"));
        assert!(markup.contains("<location filename=\"a.cpp\" line=\"12\"/>"));
        assert!(markup.contains("<comment></comment>"));

        let outcome = parse(&markup, "test.ts").expect("parsable");
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.catalog, catalog);
    }
}
