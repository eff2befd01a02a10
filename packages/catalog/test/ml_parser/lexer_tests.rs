/**
 * Markup Lexer Tests
 *
 * Token-level coverage: tags, attributes, entity decoding, the document
 * prolog, and error positions.
 */

#[cfg(test)]
mod tests {
    use linguist_catalog::ml_parser::lexer::tokenize;
    use linguist_catalog::ml_parser::tokens::{Token, TokenType};

    fn token_types(source: &str) -> Vec<TokenType> {
        tokenize(source, "test.ts")
            .tokens
            .iter()
            .map(|token| token.token_type())
            .collect()
    }

    #[test]
    fn tokenizes_an_element_with_attributes() {
        let result = tokenize(r#"<message numerus="yes">x</message>"#, "test.ts");
        assert!(result.errors.is_empty());
        assert_eq!(
            token_types(r#"<message numerus="yes">x</message>"#),
            vec![
                TokenType::TagOpenStart,
                TokenType::AttrName,
                TokenType::AttrValue,
                TokenType::TagOpenEnd,
                TokenType::Text,
                TokenType::TagClose,
                TokenType::Eof,
            ]
        );

        match &result.tokens[0] {
            Token::TagOpenStart(token) => assert_eq!(token.name, "message"),
            other => panic!("expected TagOpenStart, got {:?}", other),
        }
        match &result.tokens[1] {
            Token::AttrName(token) => assert_eq!(token.name, "numerus"),
            other => panic!("expected AttrName, got {:?}", other),
        }
        match &result.tokens[2] {
            Token::AttrValue(token) => assert_eq!(token.value, "yes"),
            other => panic!("expected AttrValue, got {:?}", other),
        }
        match &result.tokens[4] {
            Token::Text(token) => assert_eq!(token.value, "x"),
            other => panic!("expected Text, got {:?}", other),
        }
        match &result.tokens[5] {
            Token::TagClose(token) => assert_eq!(token.name, "message"),
            other => panic!("expected TagClose, got {:?}", other),
        }
    }

    #[test]
    fn tokenizes_a_void_element() {
        assert_eq!(
            token_types(r#"<location filename="a.cpp" line="12"/>"#),
            vec![
                TokenType::TagOpenStart,
                TokenType::AttrName,
                TokenType::AttrValue,
                TokenType::AttrName,
                TokenType::AttrValue,
                TokenType::TagOpenEndVoid,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn decodes_the_five_standard_entities_in_text() {
        let result = tokenize("<s>&amp;&lt;&gt;&quot;&apos;</s>", "test.ts");
        assert!(result.errors.is_empty());
        match &result.tokens[2] {
            Token::Text(token) => assert_eq!(token.value, "&<>\"'"),
            other => panic!("expected Text, got {:?}", other),
        }
    }

    #[test]
    fn decodes_character_references() {
        let result = tokenize("<s>&#65;&#x42;</s>", "test.ts");
        assert!(result.errors.is_empty());
        match &result.tokens[2] {
            Token::Text(token) => assert_eq!(token.value, "AB"),
            other => panic!("expected Text, got {:?}", other),
        }
    }

    #[test]
    fn decodes_entities_inside_attribute_values() {
        let result = tokenize(r#"<a b="x &amp; y"/>"#, "test.ts");
        assert!(result.errors.is_empty());
        match &result.tokens[2] {
            Token::AttrValue(token) => assert_eq!(token.value, "x & y"),
            other => panic!("expected AttrValue, got {:?}", other),
        }
    }

    #[test]
    fn accepts_single_quoted_attribute_values() {
        let result = tokenize("<a b='q'/>", "test.ts");
        assert!(result.errors.is_empty());
        match &result.tokens[2] {
            Token::AttrValue(token) => assert_eq!(token.value, "q"),
            other => panic!("expected AttrValue, got {:?}", other),
        }
    }

    #[test]
    fn reports_an_unknown_entity_with_its_position() {
        let result = tokenize("<s>&nope;</s>", "test.ts");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].msg.contains("Unknown entity"));
        assert_eq!(result.errors[0].line(), 0);
        assert_eq!(result.errors[0].col(), 3);
        // The raw reference is kept so scanning can continue.
        match &result.tokens[2] {
            Token::Text(token) => assert_eq!(token.value, "&nope;"),
            other => panic!("expected Text, got {:?}", other),
        }
    }

    #[test]
    fn reports_a_malformed_character_reference() {
        let result = tokenize("<s>&#xZZ;</s>", "test.ts");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].msg.contains("Malformed character reference"));
    }

    #[test]
    fn tokenizes_the_document_prolog() {
        let result = tokenize(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<!-- note -->",
            "test.ts",
        );
        assert!(result.errors.is_empty());
        assert_eq!(
            result
                .tokens
                .iter()
                .map(|token| token.token_type())
                .collect::<Vec<_>>(),
            vec![
                TokenType::Declaration,
                TokenType::Text,
                TokenType::DocType,
                TokenType::Text,
                TokenType::Comment,
                TokenType::Eof,
            ]
        );
        match &result.tokens[2] {
            Token::DocType(token) => assert_eq!(token.content, "DOCTYPE TS"),
            other => panic!("expected DocType, got {:?}", other),
        }
        match &result.tokens[4] {
            Token::Comment(token) => assert_eq!(token.value, " note "),
            other => panic!("expected Comment, got {:?}", other),
        }
    }

    #[test]
    fn reports_an_unterminated_opening_tag() {
        let result = tokenize("<message", "test.ts");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0]
            .msg
            .contains("Unexpected end of input in opening tag \"message\""));
    }

    #[test]
    fn tracks_line_and_column_positions() {
        let result = tokenize("ab\n<tag>", "test.ts");
        let span = result.tokens[1].source_span();
        assert_eq!(result.tokens[1].token_type(), TokenType::TagOpenStart);
        assert_eq!(span.start.line, 1);
        assert_eq!(span.start.col, 0);
    }
}
