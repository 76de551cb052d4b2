use segmatch::{Delimited, InvalidPath, Matcher, Rule, Strategy};

struct InsertTest<S: Strategy>(
    Matcher<&'static str, S>,
    Vec<(&'static str, Result<(), InvalidPath>)>,
);

impl<S: Strategy> InsertTest<S> {
    fn run(self) -> Matcher<&'static str, S> {
        let InsertTest(mut matcher, cases) = self;
        for (pattern, expected) in cases {
            let got = matcher.insert_with_payload(pattern, pattern);
            assert_eq!(got, expected, "{pattern}");
        }
        matcher
    }
}

fn invalid(path: &str) -> Result<(), InvalidPath> {
    Err(InvalidPath::new(path))
}

#[test]
fn empty_pattern() {
    let matcher = InsertTest(
        Matcher::router(),
        vec![("", invalid("")), ("/", Ok(())), ("", invalid(""))],
    )
    .run();

    assert_eq!(matcher.len(), 1);

    InsertTest(Matcher::mqtt(), vec![("", invalid("")), ("#", Ok(()))]).run();
    InsertTest(Matcher::nats(), vec![("", invalid("")), (">", Ok(()))]).run();
}

#[test]
fn no_validation_beyond_splitting() {
    let matcher = InsertTest(
        Matcher::router(),
        vec![
            ("//", Ok(())),
            ("/a//b/", Ok(())),
            ("no-leading-slash", Ok(())),
            ("/*/middle/*", Ok(())),
            ("/:a/:a", Ok(())),
            ("/:", Ok(())),
            ("/ ", Ok(())),
        ],
    )
    .run();

    assert_eq!(matcher.len(), 7);

    // a lone sigil is a literal
    let matched = matcher.match_named("/:").unwrap();
    assert_eq!(matched.pattern, "/:");
    assert!(matched.params.is_empty());
}

#[test]
fn duplicates_accumulate() {
    let matcher = InsertTest(
        Matcher::mqtt(),
        vec![
            ("a/+/b", Ok(())),
            ("a/+/b", Ok(())),
            ("a/#", Ok(())),
            ("a/#", Ok(())),
        ],
    )
    .run();

    assert_eq!(matcher.len(), 2);
    assert_eq!(matcher.payloads("a/x/b"), Some(&["a/+/b", "a/+/b"][..]));
    assert_eq!(matcher.payloads("a/x/c"), Some(&["a/#", "a/#"][..]));
}

#[test]
fn custom_splitter() {
    struct Words;

    impl Strategy for Words {
        fn param<'s>(&self, segment: &'s str) -> Option<&'s str> {
            segment.strip_prefix('<')?.strip_suffix('>')
        }

        fn wildcard<'s>(&self, segment: &'s str) -> Option<&'s str> {
            (segment == "...").then_some(segment)
        }

        fn split<'p>(&self, path: &'p str) -> Result<Vec<&'p str>, InvalidPath> {
            let words = path.split_whitespace().collect::<Vec<_>>();
            if words.is_empty() {
                return Err(InvalidPath::new(path));
            }
            Ok(words)
        }
    }

    let matcher = InsertTest(
        Matcher::new(Words),
        vec![
            ("   ", invalid("   ")),
            ("turn <device> on", Ok(())),
            ("say ...", Ok(())),
        ],
    )
    .run();

    let matched = matcher.match_named("turn   lamp on").unwrap();
    assert_eq!(matched.pattern, "turn <device> on");
    assert_eq!(matched.params.get("device"), Some("lamp"));

    assert!(matcher.is_match("say hello world"));
    assert!(!matcher.is_match(""));
    assert!(!matcher.is_match("\t"));
}

#[test]
fn priority_of_shared_segments() {
    let mut matcher = Matcher::<&str>::router();

    // both patterns share `/a`, which keeps the priority it was created with
    matcher.insert_with("/a/:x", 5, "param").unwrap();
    matcher.insert_with("/:y/b", 1, "other").unwrap();
    matcher.insert_with("/a/b", 9, "literal").unwrap();

    // `/:y` (priority 1) is tried before `/a` (priority 5)
    let matched = matcher.match_named("/a/b").unwrap();
    assert_eq!(matched.pattern, "/:y/b");
    assert_eq!(matched.params.get("y"), Some("a"));

    // below `/a`, `:x` (priority 5) is tried before `b` (priority 9)
    matcher.delete("/:y/b");
    let matched = matcher.match_named("/a/b").unwrap();
    assert_eq!(matched.pattern, "/a/:x");
    assert_eq!(matched.payloads, ["param"]);
}

#[test]
fn literal_param_same_text() {
    let matcher = InsertTest(
        Matcher::router(),
        vec![("/user/id", Ok(())), ("/user/:id", Ok(()))],
    )
    .run();

    // `:id` lands on the existing `id` literal, which now ends `/user/:id`
    assert_eq!(matcher.len(), 1);
    let matched = matcher.match_named("/user/id").unwrap();
    assert_eq!(matched.pattern, "/user/:id");
    assert_eq!(matched.payloads, ["/user/id", "/user/:id"]);
    assert!(matched.params.is_empty());

    assert!(matcher.match_named("/user/5").is_none());
}

#[test]
fn custom_rules() {
    let strategy = Delimited::new('|', Rule::named("@"), Rule::Never);
    let matcher = InsertTest(
        Matcher::new(strategy),
        vec![("svc|@name|*", Ok(())), ("svc|@name|#", Ok(()))],
    )
    .run();

    // without a wildcard rule `*` is a plain literal
    assert!(matcher.is_match("svc|auth|*"));
    assert!(!matcher.is_match("svc|auth|health"));
}
