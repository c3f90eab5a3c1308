use super::*;

// =============================================================================
// Direct constructors
// =============================================================================

/// Text of the QName starting at the current token, if any.
fn peek_qname_text<'t>(p: &mut Parser<'t>) -> Option<&'t str> {
    let len = qname_len(p, 0)?;
    let start = p.nth_range(0).start();
    let end = p.nth_range(len - 1).end();
    Some(p.slice(rowan::TextRange::new(start, end)))
}

/// DirElemConstructor = "<" QName DirAttributeList ("/>" | (">" DirElemContent* "</" QName S? ">"))
///
/// Called at a code-mode `<` that starts an element (the lexer is switched
/// into the start tag state here) or at a nested `OPEN_XML_TAG`.
pub(super) fn dir_elem_constructor(p: &mut Parser<'_>) -> Parsed {
    if p.at(LESS_THAN) && !p.begin_direct_element() {
        return Parsed::NoMatch;
    }
    if !p.at(OPEN_XML_TAG) {
        return Parsed::NoMatch;
    }
    p.start_node(DIR_ELEM_CONSTRUCTOR);
    p.bump();

    let open = peek_qname_text(p).unwrap_or_default().to_string();
    let mut parsed = expect_qname(p);
    dir_attribute_list(p);

    match p.current() {
        SELF_CLOSING_XML_TAG => p.bump(),
        END_XML_TAG => {
            p.bump();
            dir_elem_content(p);
            if !close_tag(p, &open) {
                parsed = Parsed::Error;
            }
        }
        _ => {
            p.error(Message::Expected(">"));
            parsed = Parsed::Error;
        }
    }
    p.finish_node();
    parsed
}

/// "</" QName S? ">", checked against the open tag.
fn close_tag(p: &mut Parser<'_>, open: &str) -> bool {
    if !p.at(CLOSE_XML_TAG) {
        p.error(Message::ExpectedClosingTag(open.to_string()));
        return false;
    }
    p.bump();
    let mut ok = true;
    match peek_qname_text(p) {
        Some(close) if close != open => {
            let error = p.start_error(Message::MismatchedClosingTag {
                open: open.to_string(),
                close: close.to_string(),
            });
            qname(p);
            p.finish_error(error);
            ok = false;
        }
        Some(_) => {
            qname(p);
        }
        None => {
            p.error(Message::MissingQName);
            ok = false;
        }
    }
    p.expect(END_XML_TAG) && ok
}

/// DirAttributeList = (S (QName S? "=" S? DirAttributeValue)?)*
///
/// Everything up to the end of the start tag belongs to the list; tokens
/// that cannot start an attribute are wrapped as errors.
fn dir_attribute_list(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    let mut any = false;
    loop {
        match p.current() {
            END_XML_TAG | SELF_CLOSING_XML_TAG | EOF => break,
            kind if kind.is_name() => dir_attribute(p),
            _ => p.error_and_bump_stray(),
        }
        any = true;
    }
    if any {
        p.start_node_at(cp, DIR_ATTRIBUTE_LIST);
        p.finish_node();
    }
}

fn dir_attribute(p: &mut Parser<'_>) {
    p.start_node(DIR_ATTRIBUTE);
    qname(p);
    p.expect(EQUAL);
    if p.at(XML_ATTRIBUTE_VALUE_START) {
        dir_attribute_value(p);
    } else {
        p.error(Message::ExpectedEither("\"", "'"));
    }
    p.finish_node();
}

/// DirAttributeValue = ('"' (EscapeQuot | QuotAttrValueContent)* '"')
///                   | ("'" (EscapeApos | AposAttrValueContent)* "'")
fn dir_attribute_value(p: &mut Parser<'_>) {
    p.start_node(DIR_ATTRIBUTE_VALUE);
    p.bump();
    loop {
        match p.current() {
            XML_ATTRIBUTE_VALUE_END => {
                p.bump();
                break;
            }
            XML_ATTRIBUTE_VALUE_CONTENTS | ESCAPED_CHARACTER | CHARACTER_REFERENCE
            | BAD_CHARACTER => p.bump(),
            PREDEFINED_ENTITY_REFERENCE | PARTIAL_ENTITY_REFERENCE | EMPTY_ENTITY_REFERENCE => {
                reference_or_bump(p)
            }
            BLOCK_OPEN => {
                enclosed_expr(p);
            }
            _ => {
                p.error(Message::UnclosedStringLiteral);
                break;
            }
        }
    }
    p.finish_node();
}

/// DirElemContent = DirectConstructor | CDataSection | CommonContent | ElementContentChar
fn dir_elem_content(p: &mut Parser<'_>) {
    let cp = p.checkpoint();
    let mut any = false;
    loop {
        match p.current() {
            CLOSE_XML_TAG | EOF => break,
            XML_ELEMENT_CONTENTS | ESCAPED_CHARACTER | CHARACTER_REFERENCE | BAD_CHARACTER => {
                p.bump()
            }
            PREDEFINED_ENTITY_REFERENCE | PARTIAL_ENTITY_REFERENCE | EMPTY_ENTITY_REFERENCE => {
                reference_or_bump(p)
            }
            BLOCK_OPEN => {
                enclosed_expr(p);
            }
            OPEN_XML_TAG => {
                dir_elem_constructor(p);
            }
            XML_COMMENT_START_TAG => {
                dir_comment_constructor(p);
            }
            PROCESSING_INSTRUCTION_BEGIN => {
                dir_pi_constructor(p);
            }
            CDATA_SECTION_START_TAG => cdata_section(p),
            _ => p.error_and_bump_stray(),
        }
        any = true;
    }
    if any {
        p.start_node_at(cp, DIR_ELEM_CONTENT);
        p.finish_node();
    }
}

/// DirCommentConstructor = "<!--" DirCommentContents "-->"
pub(super) fn dir_comment_constructor(p: &mut Parser<'_>) -> Parsed {
    p.start_node(DIR_COMMENT_CONSTRUCTOR);
    p.bump();
    p.eat(XML_COMMENT_CONTENTS);
    let parsed = if p.eat(XML_COMMENT_END_TAG) {
        Parsed::Node
    } else {
        p.error(Message::UnclosedXmlComment);
        Parsed::Error
    };
    p.finish_node();
    parsed
}

/// DirPIConstructor = "<?" PITarget (S DirPIContents)? "?>"
pub(super) fn dir_pi_constructor(p: &mut Parser<'_>) -> Parsed {
    p.start_node(DIR_PI_CONSTRUCTOR);
    p.bump();
    let mut parsed = Parsed::Node;
    if !p.eat(NCNAME) {
        p.error(Message::MissingNCName);
        parsed = Parsed::Error;
    }
    p.eat(PROCESSING_INSTRUCTION_CONTENTS);
    if !p.eat(PROCESSING_INSTRUCTION_END) {
        p.error(Message::UnclosedProcessingInstruction);
        parsed = Parsed::Error;
    }
    p.finish_node();
    parsed
}

/// CDataSection = "<![CDATA[" CDataSectionContents "]]>"
pub(super) fn cdata_section(p: &mut Parser<'_>) {
    p.start_node(CDATA_SECTION);
    p.bump();
    p.eat(CDATA_SECTION_CONTENTS);
    if !p.eat(CDATA_SECTION_END_TAG) {
        p.error(Message::UnclosedCdata);
    }
    p.finish_node();
}

// =============================================================================
// Computed constructors
// =============================================================================

/// Whether the tokens after the keyword are `{` or an EQName followed by
/// `{`.
fn at_named_constructor(p: &mut Parser<'_>) -> bool {
    p.nth_at(1, BLOCK_OPEN) || eqname_len(p, 1).is_some_and(|len| p.nth_at(1 + len, BLOCK_OPEN))
}

/// ComputedConstructor = CompDocConstructor | CompElemConstructor
///                     | CompAttrConstructor | CompNamespaceConstructor
///                     | CompTextConstructor | CompCommentConstructor
///                     | CompPIConstructor
///
/// MarkLogic adds binary and JSON node constructors.
pub(super) fn computed_constructor(p: &mut Parser<'_>) -> Parsed {
    let brace = p.nth_at(1, BLOCK_OPEN);
    let kind = match p.current() {
        K_DOCUMENT if brace => COMP_DOC_CONSTRUCTOR,
        K_TEXT if brace => COMP_TEXT_CONSTRUCTOR,
        K_COMMENT if brace => COMP_COMMENT_CONSTRUCTOR,
        K_ELEMENT if at_named_constructor(p) => COMP_ELEM_CONSTRUCTOR,
        K_ATTRIBUTE if at_named_constructor(p) => COMP_ATTR_CONSTRUCTOR,
        K_NAMESPACE | K_PROCESSING_INSTRUCTION
            if brace || (p.nth(1).is_name() && p.nth_at(2, BLOCK_OPEN)) =>
        {
            match p.current() {
                K_NAMESPACE if p.supports(COMP_NAMESPACE_CONSTRUCTOR) => COMP_NAMESPACE_CONSTRUCTOR,
                K_NAMESPACE => return Parsed::NoMatch,
                _ => COMP_PI_CONSTRUCTOR,
            }
        }
        K_BINARY if brace && p.supports(COMP_BINARY_CONSTRUCTOR) => COMP_BINARY_CONSTRUCTOR,
        K_OBJECT_NODE if brace && p.supports(COMP_OBJECT_NODE_CONSTRUCTOR) => {
            COMP_OBJECT_NODE_CONSTRUCTOR
        }
        K_ARRAY_NODE if brace && p.supports(COMP_ARRAY_NODE_CONSTRUCTOR) => {
            COMP_ARRAY_NODE_CONSTRUCTOR
        }
        K_NUMBER_NODE if brace && p.supports(COMP_NUMBER_NODE_CONSTRUCTOR) => {
            COMP_NUMBER_NODE_CONSTRUCTOR
        }
        K_BOOLEAN_NODE if brace && p.supports(COMP_BOOLEAN_NODE_CONSTRUCTOR) => {
            COMP_BOOLEAN_NODE_CONSTRUCTOR
        }
        K_NULL_NODE if brace && p.supports(COMP_NULL_NODE_CONSTRUCTOR) => {
            COMP_NULL_NODE_CONSTRUCTOR
        }
        _ => return Parsed::NoMatch,
    };

    p.start_node(kind);
    p.bump();
    match kind {
        COMP_ELEM_CONSTRUCTOR | COMP_ATTR_CONSTRUCTOR => {
            if p.at(BLOCK_OPEN) {
                enclosed_expr(p);
            } else {
                eqname(p);
            }
        }
        COMP_NAMESPACE_CONSTRUCTOR | COMP_PI_CONSTRUCTOR => {
            if p.at(BLOCK_OPEN) {
                enclosed_expr(p);
            } else {
                p.bump_name();
            }
        }
        _ => {}
    }
    let parsed = if kind == COMP_OBJECT_NODE_CONSTRUCTOR {
        object_node_content(p)
    } else {
        enclosed_expr(p)
    };
    p.finish_node();
    parsed
}

/// "{" (MapConstructorEntry ("," MapConstructorEntry)*)? "}"
fn object_node_content(p: &mut Parser<'_>) -> Parsed {
    if !p.eat(BLOCK_OPEN) {
        p.error(Message::Expected("{"));
        return Parsed::Error;
    }
    if !p.at(BLOCK_CLOSE) {
        loop {
            map_constructor_entry(p);
            if !p.eat(COMMA) {
                break;
            }
        }
    }
    close_brace(p)
}
