use std::collections::BTreeMap;

use sap_engine::{rewrite, AccessChange, AccessLevel};

/// Applies `change` to every line and compares the resulting file. Lines
/// whose text is unchanged must also be absent from the result map.
fn check(change: AccessChange, source: &str, expected: &str) {
    check_lines(change, None, source, expected);
}

fn check_lines(change: AccessChange, targets: Option<&[usize]>, source: &str, expected: &str) {
    let lines: Vec<&str> = source.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(
        lines.len(),
        expected_lines.len(),
        "fixture and expectation disagree on line count"
    );

    let all: Vec<usize> = (0..lines.len()).collect();
    let targets = targets.unwrap_or(&all);
    let rewritten: BTreeMap<usize, String> = rewrite(&lines, targets, change);

    for (idx, (&line, &want)) in lines.iter().zip(expected_lines.iter()).enumerate() {
        let got = rewritten.get(&idx).map_or(line, String::as_str);
        assert_eq!(got, want, "line {}: {:?}", idx, line);
        if line == want {
            assert!(
                !rewritten.contains_key(&idx),
                "line {} reported an identity rewrite: {:?}",
                idx,
                line
            );
        }
    }
}

fn apply_once(change: AccessChange, source: &str) -> Vec<String> {
    let lines: Vec<&str> = source.lines().collect();
    let all: Vec<usize> = (0..lines.len()).collect();
    let rewritten = rewrite(&lines, &all, change);

    lines
        .iter()
        .enumerate()
        .map(|(idx, &line)| {
            rewritten
                .get(&idx)
                .cloned()
                .unwrap_or_else(|| line.to_string())
        })
        .collect()
}

fn assert_idempotent(change: AccessChange, source: &str) {
    let once = apply_once(change, source);
    let all: Vec<usize> = (0..once.len()).collect();
    let again = rewrite(&once, &all, change);
    assert!(again.is_empty(), "second pass still rewrote: {:?}", again);
}

#[test]
fn class_members_become_public_and_locals_stay() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"final class ViewController: NSViewController {
    @IBOutlet var textView: NSTextView!

    override func viewDidLoad() {
        super.viewDidLoad()
        let strings: [Highlight<NSAttributedString>] = markdown()
        let result = strings.map { $0.rendered }.reduce(NSMutableAttributedString()) {
            $0.append($1)
            return $0
        }
        textView.textStorage!.setAttributedString(result)
    }
}"#,
        r#"final public class ViewController: NSViewController {
    @IBOutlet public var textView: NSTextView!

    override public func viewDidLoad() {
        super.viewDidLoad()
        let strings: [Highlight<NSAttributedString>] = markdown()
        let result = strings.map { $0.rendered }.reduce(NSMutableAttributedString()) {
            $0.append($1)
            return $0
        }
        textView.textStorage!.setAttributedString(result)
    }
}"#,
    );
}

#[test]
fn enum_cases_are_never_annotated() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"enum Kind: Int {
    case keyword, string, comment
    case number

    init?(raw: Int) {
        self.init(rawValue: raw)
    }
}"#,
        r#"public enum Kind: Int {
    case keyword, string, comment
    case number

    public init?(raw: Int) {
        self.init(rawValue: raw)
    }
}"#,
    );
}

#[test]
fn top_level_declarations_in_sequence() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"public let alreadyDone = ["*": "em"]
struct Highlight<A> {
    let offset: Int
    let rendered: A
}
func highlight(_ text: String) -> String {
    return text
}"#,
        r#"public let alreadyDone = ["*": "em"]
public struct Highlight<A> {
    public let offset: Int
    public let rendered: A
}
public func highlight(_ text: String) -> String {
    return text
}"#,
    );
}

#[test]
fn protocol_members_are_left_alone() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"protocol HighlightedCode {
    static var keyword: Self { get }
    var whatever: String { get set }
    func render() -> String
}"#,
        r#"public protocol HighlightedCode {
    static var keyword: Self { get }
    var whatever: String { get set }
    func render() -> String
}"#,
    );
}

#[test]
fn conformance_extension_header_is_ineligible_but_members_are_not() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"extension NSAttributedString: HighlightedCode {
    static var keyword: NSAttributedString {
        return .init(string: "keyword")
    }
    static func paragraph(withStyle style: String) -> NSAttributedString {
        return .init(string: style)
    }
}"#,
        r#"extension NSAttributedString: HighlightedCode {
    static public var keyword: NSAttributedString {
        return .init(string: "keyword")
    }
    static public func paragraph(withStyle style: String) -> NSAttributedString {
        return .init(string: style)
    }
}"#,
    );
}

#[test]
fn member_access_spelled_init_is_not_a_declaration() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"required init?(coder aDecoder: NSCoder) {
    super.init(style: .grouped)
}"#,
        r#"required public init?(coder aDecoder: NSCoder) {
    super.init(style: .grouped)
}"#,
    );
}

#[test]
fn modifiers_keep_their_position() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"final class MyFinalClass {
    static private var counter = 0
    static var playing: [Player] {
        return registry
    }
    lazy var screen = Screen()
    weak var delegate: Delegate?
    unowned let parent: Node
    unowned(safe) let safeParent: Node
    unowned(unsafe) let fastParent: Node
    mutating func nest<X>(_ x: X) {
    }
    required init() {
    }
    convenience init(n: Int) {
    }
}
@objc dynamic let things: [Thing] = []"#,
        r#"final public class MyFinalClass {
    static public var counter = 0
    static public var playing: [Player] {
        return registry
    }
    lazy public var screen = Screen()
    weak public var delegate: Delegate?
    unowned public let parent: Node
    unowned(safe) public let safeParent: Node
    unowned(unsafe) public let fastParent: Node
    mutating public func nest<X>(_ x: X) {
    }
    required public init() {
    }
    convenience public init(n: Int) {
    }
}
@objc dynamic public let things: [Thing] = []"#,
    );
}

#[test]
fn attributes_on_their_own_lines() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"@available(macOS 10.12, *)
class Available {
    @objc
    func exposed() {
    }
}"#,
        r#"@available(macOS 10.12, *)
public class Available {
    @objc
    public func exposed() {
    }
}"#,
    );
}

#[test]
fn make_api_struct_matrix() {
    check(
        AccessChange::MakeApi,
        r#"struct TestStruct {
    let implicitInternal = 0
    internal let explicitInternal = 0
    public let alreadyPublic = 0
    open let opened = 0
    private let hidden = 0
    fileprivate let filed = 0
}"#,
        r#"public struct TestStruct {
    public let implicitInternal = 0
    public let explicitInternal = 0
    public let alreadyPublic = 0
    open let opened = 0
    private let hidden = 0
    fileprivate let filed = 0
}"#,
    );
}

#[test]
fn remove_api_struct_matrix() {
    check(
        AccessChange::RemoveApi,
        r#"public struct TestStruct {
    public let wasPublic = 0
    open let wasOpen = 0
    let implicitInternal = 0
    internal let explicitInternal = 0
    private let hidden = 0
}"#,
        r#"struct TestStruct {
    let wasPublic = 0
    let wasOpen = 0
    let implicitInternal = 0
    internal let explicitInternal = 0
    private let hidden = 0
}"#,
    );
}

#[test]
fn increase_struct_matrix() {
    check(
        AccessChange::IncreaseAccess,
        r#"struct TestStruct {
    private let hidden = 0
    fileprivate let filed = 0
    let implicitInternal = 0
    internal let explicitInternal = 0
    public let alreadyPublic = 0
    open let opened = 0
}"#,
        r#"public struct TestStruct {
    let hidden = 0
    let filed = 0
    public let implicitInternal = 0
    public let explicitInternal = 0
    public let alreadyPublic = 0
    public let opened = 0
}"#,
    );
}

#[test]
fn decrease_struct_matrix() {
    check(
        AccessChange::DecreaseAccess,
        r#"struct TestStruct {
    public let wasPublic = 0
    open let wasOpen = 0
    let implicitInternal = 0
    internal let explicitInternal = 0
    private let hidden = 0
    fileprivate let filed = 0
}"#,
        r#"private struct TestStruct {
    let wasPublic = 0
    let wasOpen = 0
    private let implicitInternal = 0
    private let explicitInternal = 0
    private let hidden = 0
    private let filed = 0
}"#,
    );
}

#[test]
fn plain_extension_is_promoted_with_its_members() {
    check(
        AccessChange::MakeApi,
        r#"extension Human {
    func callForService() {
    }
}"#,
        r#"public extension Human {
    public func callForService() {
    }
}"#,
    );
}

#[test]
fn private_extension_caps_its_members() {
    check(
        AccessChange::MakeApi,
        r#"private extension Human {
    func callForServiceA() {
    }
}"#,
        r#"private extension Human {
    func callForServiceA() {
    }
}"#,
    );

    check(
        AccessChange::IncreaseAccess,
        r#"private extension Human {
    func capped() {
    }
}"#,
        r#"extension Human {
    func capped() {
    }
}"#,
    );
}

#[test]
fn remove_api_leaves_implicitly_public_extension_members() {
    check(
        AccessChange::RemoveApi,
        r#"public extension Human {
    func implicitlyPublic() {
    }
}"#,
        r#"extension Human {
    func implicitlyPublic() {
    }
}"#,
    );
}

#[test]
fn members_of_public_extensions_saturate_on_increase() {
    check(
        AccessChange::IncreaseAccess,
        r#"public extension Human {
    func alreadyTopOfLadder() {
    }
}"#,
        r#"public extension Human {
    func alreadyTopOfLadder() {
    }
}"#,
    );
}

#[test]
fn extension_inheritance_under_single_level() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"public struct MyStruct {
}
public extension MyStruct {
    static var firstValue: Int { return 1 }
    class PublicSubclass {
        static var subFirst: Int { return 1 }
    }
}"#,
        r#"public struct MyStruct {
}
public extension MyStruct {
    static var firstValue: Int { return 1 }
    class PublicSubclass {
        static public var subFirst: Int { return 1 }
    }
}"#,
    );
}

#[test]
fn extension_inheritance_under_decrease() {
    check(
        AccessChange::DecreaseAccess,
        r#"public struct MyStruct {
}
public extension MyStruct {
    static var firstValue: Int { return 1 }
    public static var secondValue: Int { return 2 }
    class PublicSubclass {
        public static let publicValue = 1
        static let internalValue = 2
    }
}"#,
        r#"struct MyStruct {
}
extension MyStruct {
    static var firstValue: Int { return 1 }
    static var secondValue: Int { return 2 }
    class PublicSubclass {
        static let publicValue = 1
        static private let internalValue = 2
    }
}"#,
    );
}

#[test]
fn setter_annotations_under_increase() {
    check(
        AccessChange::IncreaseAccess,
        r#"private(set) var a = 0
fileprivate(set) var b = 0
internal(set) var c = 0
public(set) var d = 0"#,
        r#"private(set) public var a = 0
fileprivate(set) public var b = 0
internal(set) public var c = 0
public var d = 0"#,
    );
}

#[test]
fn setter_annotations_under_decrease() {
    check(
        AccessChange::DecreaseAccess,
        r#"private(set) internal var a = 0
fileprivate(set) internal var b = 0
private(set) public var c = 0"#,
        r#"private var a = 0
private var b = 0
private(set) var c = 0"#,
    );
}

#[test]
fn setter_annotations_under_remove_api() {
    check(
        AccessChange::RemoveApi,
        r#"internal(set) public var a = 0
fileprivate(set) public var b = 0
private(set) public var c = 0"#,
        r#"var a = 0
fileprivate(set) var b = 0
private(set) var c = 0"#,
    );
}

#[test]
fn setter_annotations_under_single_level() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"private(set) public var x: String
private(set) var y: String"#,
        r#"public var x: String
public var y: String"#,
    );

    check(
        AccessChange::SingleLevel(AccessLevel::Private),
        r#"private(set) fileprivate var a = 0"#,
        r#"private var a = 0"#,
    );
}

#[test]
fn setter_annotation_on_subscript() {
    check(
        AccessChange::RemoveApi,
        r#"internal(set) public subscript(idx: Int) -> String {
    return rows[idx]
}"#,
        r#"subscript(idx: Int) -> String {
    return rows[idx]
}"#,
    );
}

#[test]
fn strip_removes_all_notation() {
    check(
        AccessChange::Strip,
        r#"public struct S {
    internal let y = 1
    private(set) public var x = 0
    fileprivate func helper() {
    }
}
open class C {}"#,
        r#"struct S {
    let y = 1
    var x = 0
    func helper() {
    }
}
class C {}"#,
    );
}

#[test]
fn open_is_respelled_public_on_set() {
    check(
        AccessChange::SingleLevel(AccessLevel::Public),
        r#"open class ViewController {
    @objc open dynamic let name = "n"
    open lazy var screen = Screen()
    open override func refresh() {
    }
}"#,
        r#"public class ViewController {
    @objc public dynamic let name = "n"
    public lazy var screen = Screen()
    public override func refresh() {
    }
}"#,
    );
}

#[test]
fn control_flow_bodies_are_local() {
    check(
        AccessChange::MakeApi,
        r#"for window in windows {
    let views = window.subviews
}
while running {
    let tick = now()
}
repeat {
    let again = false
} while again
do {
    let data = try read()
} catch {
    let msg = "\(error)"
}
defer {
    let cleanup = true
}"#,
        r#"for window in windows {
    let views = window.subviews
}
while running {
    let tick = now()
}
repeat {
    let again = false
} while again
do {
    let data = try read()
} catch {
    let msg = "\(error)"
}
defer {
    let cleanup = true
}"#,
    );
}

#[test]
fn conditional_compilation_is_transparent() {
    check(
        AccessChange::MakeApi,
        r#"#if canImport(UIKit)
struct Thingie {
    init() {
    }
}
#endif"#,
        r#"#if canImport(UIKit)
public struct Thingie {
    public init() {
    }
}
#endif"#,
    );
}

#[test]
fn operator_declarations_stay_bare_but_operator_funcs_do_not() {
    check(
        AccessChange::MakeApi,
        r#"prefix operator ^
prefix func ^ (value: String) -> String {
    return value.uppercased()
}
infix operator |>: Pipe
precedencegroup Pipe {
    associativity: left
}"#,
        r#"prefix operator ^
public prefix func ^ (value: String) -> String {
    return value.uppercased()
}
infix operator |>: Pipe
precedencegroup Pipe {
    associativity: left
}"#,
    );
}

#[test]
fn computed_properties_and_subscripts_hide_their_accessors() {
    check(
        AccessChange::MakeApi,
        r#"struct Matrix {
    subscript(row: Int) -> Double {
        get { return grid[row] }
        set { grid[row] = newValue }
    }
    var magnitude: Double {
        return grid.count
    }
}"#,
        r#"public struct Matrix {
    public subscript(row: Int) -> Double {
        get { return grid[row] }
        set { grid[row] = newValue }
    }
    public var magnitude: Double {
        return grid.count
    }
}"#,
    );
}

#[test]
fn wrapped_signatures_still_open_a_body() {
    check(
        AccessChange::Strip,
        r#"public func setImage(with resource: Resource?,
                     options: Options? = nil,
                     completionHandler: Handler? = nil)
{
    let task = setImage(with: resource)
}
let after = 1"#,
        r#"func setImage(with resource: Resource?,
                     options: Options? = nil,
                     completionHandler: Handler? = nil)
{
    let task = setImage(with: resource)
}
let after = 1"#,
    );
}

#[test]
fn comments_and_strings_are_opaque() {
    check(
        AccessChange::MakeApi,
        r#"// struct Fake {
let real = 1 // struct AlsoFake {
/* struct Commented { */ let second = 2
let brace = "{"
func quoted() -> String {
    return "}"
}"#,
        r#"// struct Fake {
public let real = 1 // struct AlsoFake {
/* struct Commented { */ public let second = 2
public let brace = "{"
public func quoted() -> String {
    return "}"
}"#,
    );
}

#[test]
fn unbalanced_input_still_rewrites_what_it_saw() {
    check(
        AccessChange::MakeApi,
        r#"struct Truncated {
    let first = 1
    let second = 2"#,
        r#"public struct Truncated {
    public let first = 1
    public let second = 2"#,
    );
}

#[test]
fn only_requested_lines_are_rewritten() {
    check_lines(
        AccessChange::SingleLevel(AccessLevel::Public),
        Some(&[0, 4]),
        r#"open class One {
}
open class Two {
}
open func three() {
}"#,
        r#"public class One {
}
open class Two {
}
public func three() {
}"#,
    );
}

#[test]
fn rank_walk_round_trip() {
    check(
        AccessChange::IncreaseAccess,
        "fileprivate let x = 1",
        "let x = 1",
    );
    check(
        AccessChange::DecreaseAccess,
        "let x = 1",
        "private let x = 1",
    );
    check(
        AccessChange::IncreaseAccess,
        "private let x = 1",
        "let x = 1",
    );
}

#[test]
fn single_level_internal_is_spelled_out() {
    check(
        AccessChange::SingleLevel(AccessLevel::Internal),
        r#"public struct S {
    private let x = 0
    let y = 0
}"#,
        r#"internal struct S {
    internal let x = 0
    let y = 0
}"#,
    );
}

#[test]
fn stable_under_repeated_application() {
    let fixture = r#"public struct S {
    private(set) public var x = 0
    internal let y = 1
    fileprivate func helper() {
    }
}
extension S {
    func member() {
    }
}"#;

    assert_idempotent(AccessChange::MakeApi, fixture);
    assert_idempotent(AccessChange::RemoveApi, fixture);
    assert_idempotent(AccessChange::Strip, fixture);
    assert_idempotent(AccessChange::SingleLevel(AccessLevel::Private), fixture);
    assert_idempotent(AccessChange::SingleLevel(AccessLevel::Public), fixture);
}
