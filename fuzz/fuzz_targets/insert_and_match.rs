#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (Vec<(String, i32)>, String)| {
    let mut matcher = segmatch::Matcher::router();

    for (pattern, priority) in &data.0 {
        if matcher.insert_with(pattern, *priority, priority).is_err() {
            return;
        }
    }

    let named = matcher.match_named(&data.1);
    let positional = matcher.match_positional(&data.1);
    let all = matcher.match_all(&data.1);

    assert_eq!(named.is_some(), matcher.is_match(&data.1));
    assert_eq!(positional.as_ref(), all.first());
    if let (Some(named), Some(positional)) = (named, positional) {
        assert_eq!(named.pattern, positional.pattern);
        assert_eq!(named.params.len(), positional.params.len());
    }
});
