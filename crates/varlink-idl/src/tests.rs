use rstest::rstest;

use crate::{
    MarkerPair, Member, Palette, RenderOptions, Type, is_interface_name, parse, render,
};

const SERVICE_DESCRIPTION: &str = "\
# The Varlink Service Interface is provided by every varlink service. It
# describes the service and the interfaces it implements.
interface org.varlink.service

# Returns information about a service: capabilities, vendor, and the
# interfaces it provides.
method GetInfo() -> (
  vendor: string,
  product: string,
  version: string,
  url: string,
  interfaces: []string
)

# Returns the description of an interface provided by this service.
method GetInterfaceDescription(interface: string) -> (description: string)

# The requested interface was not found.
error InterfaceNotFound (interface: string)

# The requested method was not found
error MethodNotFound (method: string)
";

#[test]
fn parses_the_service_interface() {
    let interface = parse(SERVICE_DESCRIPTION).expect("parse service description");
    assert_eq!(interface.name, "org.varlink.service");
    assert_eq!(interface.members.len(), 4);
    assert!(!interface.doc.is_empty());

    let get_info = interface.method("GetInfo").expect("GetInfo declared");
    assert!(get_info.input.is_empty());
    assert_eq!(get_info.output.len(), 5);
    assert_eq!(
        interface.method_names().collect::<Vec<_>>(),
        ["GetInfo", "GetInterfaceDescription"]
    );
}

#[test]
fn rendering_is_stable_across_round_trips() {
    let first = render(
        &parse(SERVICE_DESCRIPTION).expect("first parse"),
        &RenderOptions::plain(),
    );
    let second = render(&parse(&first).expect("reparse"), &RenderOptions::plain());
    assert_eq!(first, second);
}

#[test]
fn renders_a_small_interface_verbatim() {
    let source = "\
# Chat example
interface org.example.chat

type Message (sender: string, text: string)

method Send(message: Message) -> (id: int)

error NotDelivered (id: int)
";
    let interface = parse(source).expect("parse");
    assert_eq!(render(&interface, &RenderOptions::plain()), source);
}

#[test]
fn wraps_wide_members_one_field_per_line() {
    let source = "interface org.example.wide\n\
        method Q() -> (alpha: string, bravo: string, charlie: string, delta: string, echo: string)\n";
    let interface = parse(source).expect("parse");
    let rendered = render(&interface, &RenderOptions::plain());
    assert!(rendered.contains("method Q() -> (\n  alpha: string,\n"));
    assert!(rendered.ends_with("\n  echo: string\n)\n"));
}

#[test]
fn parses_enums_optionals_and_arrays() {
    let source = "\
interface org.example.types

type Mode (on, off, auto)

method Probe(mode: Mode, retries: ?int) -> (results: [](name: string, ok: bool))
";
    let interface = parse(source).expect("parse");
    let Member::Alias(alias) = &interface.members[0] else {
        panic!("expected alias");
    };
    assert_eq!(
        alias.ty,
        Type::Enum(vec![
            String::from("on"),
            String::from("off"),
            String::from("auto"),
        ])
    );
    let probe = interface.method("Probe").expect("Probe declared");
    assert!(matches!(probe.input[1].ty, Type::Optional(_)));
    assert!(matches!(probe.output[0].ty, Type::Array(_)));
}

#[test]
fn rejects_map_types_with_a_pointed_message() {
    let error = parse("interface org.example.x\nmethod F(m: [string]int) -> ()")
        .expect_err("map type must be rejected");
    assert!(error.message.contains("map types are not supported"));
    assert_eq!(error.line, 2);
}

#[rstest]
#[case("", 1, 1, "expected 'interface'")]
#[case("interface org\n", 1, 11, "invalid interface name 'org'")]
#[case(
    "interface org.example.x\nmethod lower() -> ()",
    2,
    8,
    "invalid method name 'lower'"
)]
#[case(
    "interface org.example.x\n\nmethod Foo() -> (a: badtype)",
    3,
    21,
    "unknown type 'badtype'"
)]
fn parse_errors_carry_one_based_positions(
    #[case] source: &str,
    #[case] line: u32,
    #[case] column: u32,
    #[case] message: &str,
) {
    let error = parse(source).expect_err("parse must fail");
    assert_eq!((error.line, error.column), (line, column), "{error}");
    assert!(error.message.contains(message), "{error}");
}

#[test]
fn enum_bodies_are_rejected_in_method_signatures() {
    let error =
        parse("interface org.example.x\nmethod F(a, b) -> ()").expect_err("enum input rejected");
    assert!(error.message.contains("expected ':'"), "{error}");
}

#[test]
fn markers_wrap_token_classes_without_affecting_layout() {
    let palette = Palette {
        keyword: MarkerPair::new("<k>", "</k>"),
        type_name: MarkerPair::new("<t>", "</t>"),
        member_name: MarkerPair::new("<n>", "</n>"),
        builtin: MarkerPair::new("<b>", "</b>"),
    };
    let source = "interface org.example.chat\n\nmethod Send(message: Message) -> (id: int)\n";
    let interface = parse(source).expect("parse");

    let colored = render(&interface, &RenderOptions::with_palette(palette));
    assert!(colored.contains("<k>method</k> <n>Send</n>"));
    assert!(colored.contains("<t>Message</t>"));
    assert!(colored.contains("<b>int</b>"));
    // Markers never push a member over the wrap threshold.
    assert_eq!(colored.lines().count(), source.lines().count());
}

#[test]
fn interface_name_validation_matches_the_parser() {
    assert!(is_interface_name("org.varlink.service"));
    assert!(parse("interface org varlink\n").is_err());
}
