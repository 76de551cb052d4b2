use criterion::{black_box, criterion_group, criterion_main, Criterion};
use segmatch::Matcher;

fn router(c: &mut Criterion) {
    let mut group = c.benchmark_group("Router");

    let mut matcher = Matcher::router();
    for route in routes!(colon) {
        matcher.insert_with_payload(route, true).unwrap();
    }
    let paths = routes!(literal).to_vec();

    group.bench_function("match_named", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(matcher.match_named(path).unwrap());
                assert!(result.payloads[0]);
            }
        });
    });

    group.bench_function("match_positional", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                let result = black_box(matcher.match_positional(path).unwrap());
                assert!(result.payloads[0]);
            }
        });
    });

    group.bench_function("is_match", |b| {
        b.iter(|| {
            for path in black_box(&paths) {
                assert!(black_box(matcher.is_match(path)));
            }
        });
    });

    group.finish();
}

fn topics(c: &mut Criterion) {
    let mut group = c.benchmark_group("Topics");

    let filters = [
        "iot/bms/things/+/up/props",
        "iot/bms/things/+/up/events/+",
        "iot/bms/things/+/up/ota/+",
        "iot/bms/things/+/down/+",
        "iot/bms/things/gateway/#",
        "iot/bms/+/+/up/#",
        "iot/bms/#",
        "iot/+/things/+/up/props",
        "sys/+/status",
        "sys/broker/#",
    ];

    let mut matcher = Matcher::mqtt();
    for (i, filter) in filters.iter().enumerate() {
        matcher.insert_with_payload(filter, i).unwrap();
    }

    let topics = [
        "iot/bms/things/edge1/up/props",
        "iot/bms/things/edge1/up/events/alarm",
        "iot/bms/things/edge2/up/ota/upgradePost",
        "iot/bms/things/gateway/up/props",
        "iot/bms/things/edge3/down/reboot",
        "iot/bms/meters/m1/up/reading",
        "iot/hvac/things/ahu1/up/props",
        "sys/broker/clients/connected",
        "sys/node1/status",
        "unrelated/topic",
    ];

    group.bench_function("match_positional", |b| {
        b.iter(|| {
            for topic in black_box(&topics) {
                black_box(matcher.match_positional(topic));
            }
        });
    });

    group.bench_function("match_all", |b| {
        b.iter(|| {
            for topic in black_box(&topics) {
                black_box(matcher.match_all(topic));
            }
        });
    });

    group.finish();
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");

    group.bench_function("router", |b| {
        b.iter(|| {
            let mut matcher = Matcher::<()>::router();
            for route in black_box(routes!(colon)) {
                matcher.insert(route).unwrap();
            }
            matcher
        });
    });

    group.finish();
}

criterion_group!(benches, router, topics, insert);
criterion_main!(benches);

macro_rules! routes {
    (literal) => {{
        routes!(finish => "p1", "p2", "p3", "p4")
    }};
    (colon) => {{
        routes!(finish => ":p1", ":p2", ":p3", ":p4")
    }};
    (finish => $p1:literal, $p2:literal, $p3:literal, $p4:literal) => {{
        [
            concat!("/authorizations"),
            concat!("/authorizations/", $p1),
            concat!("/applications/", $p1, "/tokens/", $p2),
            concat!("/events"),
            concat!("/repos/", $p1, "/", $p2, "/events"),
            concat!("/networks/", $p1, "/", $p2, "/events"),
            concat!("/orgs/", $p1, "/events"),
            concat!("/users/", $p1, "/received_events"),
            concat!("/users/", $p1, "/events/orgs/", $p2),
            concat!("/notifications"),
            concat!("/repos/", $p1, "/", $p2, "/notifications"),
            concat!("/notifications/threads/", $p1),
            concat!("/repos/", $p1, "/", $p2, "/stargazers"),
            concat!("/user/starred/", $p1, "/", $p2),
            concat!("/gists/", $p1, "/star"),
            concat!("/repos/", $p1, "/", $p2, "/git/blobs/", $p3),
            concat!("/repos/", $p1, "/", $p2, "/git/refs/", $p3),
            concat!("/issues"),
            concat!("/repos/", $p1, "/", $p2, "/issues/", $p3, "/comments"),
            concat!("/repos/", $p1, "/", $p2, "/labels/", $p3),
            concat!("/repos/", $p1, "/", $p2, "/milestones/", $p3, "/labels"),
            concat!("/orgs/", $p1, "/members/", $p2),
            concat!("/teams/", $p1, "/repos/", $p2, "/", $p3),
            concat!("/repos/", $p1, "/", $p2, "/pulls/", $p3, "/merge"),
            concat!("/repos/", $p1, "/", $p2, "/branches/", $p3),
            concat!("/repos/", $p1, "/", $p2, "/commits/", $p3, "/comments"),
            concat!("/repos/", $p1, "/", $p2, "/releases/", $p3, "/assets"),
            concat!("/repos/", $p1, "/", $p2, "/stats/punch_card"),
            concat!("/search/repositories"),
            concat!("/legacy/issues/search/", $p1, "/", $p2, "/", $p3, "/", $p4),
            concat!("/users/", $p1, "/following/", $p2),
            concat!("/user/keys/", $p1),
        ]
    }};
}

use routes;
