/**
 * Catalog Reader Tests
 *
 * Markup → Catalog: structure, statuses, plural forms, comment identity,
 * recoverable warnings, and fatal markup errors.
 */

#[cfg(test)]
mod tests {
    use linguist_catalog::{parse, MessageStatus, StructuralWarning, Translation};

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

    #[test]
    fn parses_contexts_messages_and_numerus_forms() {
        let outcome = parse(EXAMPLE, "example.ts").expect("parsable");
        assert!(outcome.warnings.is_empty());

        let catalog = &outcome.catalog;
        assert_eq!(catalog.version.as_deref(), Some("2.1"));
        assert_eq!(catalog.source_language.as_deref(), Some("en"));
        assert_eq!(catalog.language.as_deref(), Some("sv_SE"));
        assert_eq!(catalog.contexts.len(), 2);

        let context1 = &catalog.contexts[0];
        assert_eq!(context1.name, "kernel/navigationpart");
        assert_eq!(context1.messages.len(), 3);

        let message1 = &context1.messages[0];
        assert_eq!(message1.source, "Newsletter");
        assert_eq!(message1.comment, None);
        assert_eq!(message1.status, MessageStatus::Finished);
        assert_eq!(
            message1.translation,
            Translation::single("Nyhetsbrev")
        );

        let message2 = &context1.messages[1];
        assert_eq!(message2.source, "vztnewsletter");
        assert_eq!(message2.comment.as_deref(), Some("Navigation part"));
        assert_eq!(
            message2.translation,
            Translation::single("vztnewsletter2")
        );

        let message3 = &context1.messages[2];
        assert!(message3.is_plural());
        assert_eq!(message3.comment, None);
        assert_eq!(
            message3.source,
            "%1 takes at most %n argument(s). %2 is therefore invalid."
        );
        let forms = message3.translation.forms().expect("plural forms");
        assert_eq!(forms.len(), 2);
        assert_eq!(
            forms[0],
            "%1 prend au maximum %n argument. %2 est donc invalide."
        );
        assert_eq!(
            forms[1],
            "%1 prend au maximum %n arguments. %2 est donc invalide."
        );

        let context2 = &catalog.contexts[1];
        assert_eq!(context2.name, "");
        assert_eq!(context2.messages.len(), 1);
        assert_eq!(context2.messages[0].source, "%1 e-mail(s) bounced back");
    }

    #[test]
    fn distinguishes_a_missing_comment_from_an_empty_one() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message><source>a</source><translation>x</translation></message>\
             <message><source>a</source><comment></comment><translation>y</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let messages = &outcome.catalog.contexts[0].messages;
        assert_eq!(messages[0].comment, None);
        assert_eq!(messages[1].comment.as_deref(), Some(""));
    }

    #[test]
    fn decodes_translation_type_attributes() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message><source>a</source><translation type=\"unfinished\"></translation></message>\
             <message><source>b</source><translation type=\"obsolete\">old</translation></message>\
             <message><source>c</source><translation type=\"vanished\">gone</translation></message>\
             <message><source>d</source><translation>done</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let messages = &outcome.catalog.contexts[0].messages;
        assert_eq!(messages[0].status, MessageStatus::Unfinished);
        assert_eq!(messages[1].status, MessageStatus::Obsolete);
        assert_eq!(messages[2].status, MessageStatus::Vanished);
        assert_eq!(messages[3].status, MessageStatus::Finished);
    }

    #[test]
    fn a_message_without_a_translation_block_is_unfinished() {
        let outcome = parse(
            "<TS><context><name>c</name><message><source>a</source></message></context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let message = &outcome.catalog.contexts[0].messages[0];
        assert_eq!(message.status, MessageStatus::Unfinished);
        assert!(message.translation.is_empty());
    }

    #[test]
    fn an_empty_plural_translation_is_recoverable() {
        let outcome = parse(
            "<TS language=\"sv\"><context><name>c</name>\
             <message numerus=\"yes\"><source>%n file(s)</source>\
             <translation type=\"unfinished\"></translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let message = &outcome.catalog.contexts[0].messages[0];
        assert!(message.is_plural());
        assert_eq!(message.translation.forms(), Some(&[][..]));
        assert!(message.incomplete);
        assert_eq!(message.status, MessageStatus::Unfinished);
        assert_eq!(
            outcome.warnings,
            vec![StructuralWarning::EmptyPluralTranslation {
                context: "c".to_string(),
                source: "%n file(s)".to_string(),
            }]
        );
        assert_eq!(
            outcome.catalog.validate_structure(),
            outcome.warnings
        );
    }

    #[test]
    fn skips_unknown_elements_with_a_warning() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message><source>a</source><userdata>u</userdata><translation>x</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let message = &outcome.catalog.contexts[0].messages[0];
        assert_eq!(message.translation, Translation::single("x"));
        assert!(matches!(
            &outcome.warnings[0],
            StructuralWarning::UnexpectedElement { element, .. } if element == "userdata"
        ));
    }

    #[test]
    fn skips_a_message_without_source_text() {
        let outcome = parse(
            "<TS><context><name>c</name><message><translation>x</translation></message></context></TS>",
            "test.ts",
        )
        .expect("parsable");
        assert!(outcome.catalog.contexts[0].messages.is_empty());
        assert!(matches!(
            &outcome.warnings[0],
            StructuralWarning::MissingSource { context, .. } if context == "c"
        ));
    }

    #[test]
    fn warns_on_an_unknown_translation_type() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message><source>a</source><translation type=\"weird\">x</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        assert_eq!(
            outcome.catalog.contexts[0].messages[0].status,
            MessageStatus::Finished
        );
        assert!(matches!(
            &outcome.warnings[0],
            StructuralWarning::UnknownTranslationType { value, .. } if value == "weird"
        ));
    }

    #[test]
    fn reads_message_ids_and_locations() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message id=\"m1\"><location filename=\"a.cpp\" line=\"12\"/>\
             <source>s</source><translation>t</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        let message = &outcome.catalog.contexts[0].messages[0];
        assert_eq!(message.id.as_deref(), Some("m1"));
        assert_eq!(message.locations.len(), 1);
        assert_eq!(message.locations[0].filename.as_deref(), Some("a.cpp"));
        assert_eq!(message.locations[0].line, Some(12));
    }

    #[test]
    fn absent_language_attributes_stay_unspecified() {
        let outcome = parse("<TS version=\"2.1\"></TS>", "test.ts").expect("parsable");
        assert_eq!(outcome.catalog.source_language, None);
        assert_eq!(outcome.catalog.language, None);
    }

    #[test]
    fn unescapes_entities_in_source_text() {
        let outcome = parse(
            "<TS><context><name>c</name>\
             <message><source>a &amp;&lt; b</source><translation>t</translation></message>\
             </context></TS>",
            "test.ts",
        )
        .expect("parsable");
        assert_eq!(outcome.catalog.contexts[0].messages[0].source, "a &< b");
    }

    #[test]
    fn markup_errors_abort_the_document() {
        let error = parse("<TS><context></TS>", "test.ts").expect_err("must fail");
        assert!(error.msg.contains("Unexpected closing tag"));

        let error = parse("", "test.ts").expect_err("must fail");
        assert!(error.msg.contains("Missing root element"));

        let error = parse("<x/>", "test.ts").expect_err("must fail");
        assert!(error.msg.contains("Expected root element"));
    }
}
