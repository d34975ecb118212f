//! Structural fill tests.
//!
//! Every populated field must equal the value derived independently under the
//! documented key path: `object + [snake_case field name, ...]`.

use keygen::{Fill, Generator, KeyPath, Shape, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Fill)]
struct Embed {
    bool_p: Option<bool>,
    string: String,
}

#[derive(Debug, Clone, Fill)]
struct Object {
    int: isize,
    uint: u32,
    float: f64,
    string: String,
    array: [i64; 5],
    slice: Vec<bool>,
    embed: Embed,
    embed_p: Option<Box<Embed>>,
    map: HashMap<String, i64>,
}

fn collecting() -> (Generator, Arc<Mutex<Vec<String>>>) {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = errors.clone();
    let gen = Generator::new(move |err| sink.lock().unwrap().push(err.to_string()));
    (gen, errors)
}

#[test]
fn test_any_object() {
    let gen = Generator::default();
    let obj: Object = gen.any(&["object"]).unwrap();

    assert_eq!(obj.int, gen.int(&["object", "int"]));
    assert_eq!(obj.uint, gen.uint(&["object", "uint"]) as u32);
    assert_eq!(
        obj.float.to_bits(),
        gen.float64(&["object", "float"]).to_bits()
    );
    assert_eq!(obj.string, gen.string(&["object", "string"]));

    assert_eq!(
        obj.array,
        [
            gen.int64(&["object", "array", "0"]),
            gen.int64(&["object", "array", "1"]),
            gen.int64(&["object", "array", "2"]),
            gen.int64(&["object", "array", "3"]),
            gen.int64(&["object", "array", "4"]),
        ]
    );

    let slice_len = gen.length(&["object", "slice", "len"]);
    assert_eq!(obj.slice.len(), slice_len);
    let expected_slice: Vec<bool> = (0..slice_len)
        .map(|i| gen.bool(&["object", "slice", i.to_string().as_str()]))
        .collect();
    assert_eq!(obj.slice, expected_slice);

    assert_eq!(
        obj.embed,
        Embed {
            bool_p: Some(gen.bool(&["object", "embed", "bool_p"])),
            string: gen.string(&["object", "embed", "string"]),
        }
    );
    assert_eq!(
        obj.embed_p.as_deref(),
        Some(&Embed {
            bool_p: Some(gen.bool(&["object", "embed_p", "bool_p"])),
            string: gen.string(&["object", "embed_p", "string"]),
        })
    );

    let map_len = gen.length(&["object", "map", "len"]);
    let expected_map: HashMap<String, i64> = (0..map_len)
        .map(|i| {
            let i = i.to_string();
            (
                gen.string(&["object", "map", i.as_str(), "key"]),
                gen.int64(&["object", "map", i.as_str(), "value"]),
            )
        })
        .collect();
    assert_eq!(obj.map.len(), map_len);
    assert_eq!(obj.map, expected_map);
}

#[test]
fn test_fill_existing_value() {
    let gen = Generator::default();
    let mut obj = Object::zero().unwrap();
    obj.embed_p = Some(Box::new(Embed {
        bool_p: None,
        string: "stale".to_string(),
    }));

    gen.fill(&mut obj, &KeyPath::from(["object"]));

    let fresh: Object = gen.any(&["object"]).unwrap();
    assert_eq!(obj.embed_p, fresh.embed_p);
    assert_eq!(obj.map, fresh.map);
}

#[test]
fn test_zero_value() {
    let obj = Object::zero().unwrap();

    assert_eq!(obj.int, 0);
    assert_eq!(obj.array, [0; 5]);
    assert!(obj.slice.is_empty());
    assert!(obj.embed_p.is_none());
    assert_eq!(obj.embed.bool_p, None);
    assert_eq!(Object::shape(), Shape::Record("Object"));
}

#[derive(Debug, Default, PartialEq, Fill)]
struct Tagged {
    #[keygen(skip)]
    skipped: u64,
    #[keygen(rename = "renamed")]
    original: u64,
    #[keygen(rename = "via", generator())]
    walked: u64,
    #[keygen(generator("int"))]
    from_int: i16,
    #[keygen(generator("bool"))]
    flag_text: String,
    #[keygen(generator("echo", "a", "b"))]
    echoed: String,
    after: u64,
}

#[test]
fn test_field_metadata() {
    let mut gen = Generator::default();
    gen.register_named_generator("echo", |_, args, keys| {
        Ok(Value::String(format!("{}|{}", args.join("+"), keys)))
    });

    let tagged: Tagged = gen.any(&["t"]).unwrap();

    assert_eq!(tagged.skipped, 0);
    assert_eq!(tagged.original, gen.uint64(&["t", "renamed"]));
    assert_eq!(tagged.walked, gen.uint64(&["t", "via"]));
    assert_eq!(tagged.from_int, gen.int(&["t", "from_int"]) as i16);
    assert_eq!(tagged.flag_text, gen.bool(&["t", "flag_text"]).to_string());
    assert_eq!(tagged.echoed, "a+b|t/echoed");
    // A skipped field consumes no key segment.
    assert_eq!(tagged.after, gen.uint64(&["t", "after"]));
}

#[derive(Debug, Default, Fill)]
struct Broken {
    #[keygen(generator("missing"))]
    missing: u32,
    #[keygen(generator("bool"))]
    mismatched: u32,
    kept: u32,
}

#[test]
fn test_field_errors_leave_zero_and_continue() {
    let (gen, errors) = collecting();

    let broken: Broken = gen.any(&["b"]).unwrap();

    assert_eq!(broken.missing, 0);
    assert_eq!(broken.mismatched, 0);
    assert_eq!(broken.kept, gen.uint64(&["b", "kept"]) as u32);
    assert_eq!(
        *errors.lock().unwrap(),
        vec![
            "generator \"missing\" is not found".to_string(),
            "generator \"bool\": type mismatch bool and u32".to_string(),
        ]
    );
}

#[test]
#[should_panic(expected = "generator \"missing\" is not found")]
fn test_default_reporter_fails_loudly() {
    let _ = Generator::default().any::<Broken, _>(&["b"]);
}

#[allow(non_snake_case)]
#[derive(Debug, Fill)]
struct CaseConvention {
    HTTPStatus: u16,
    r#type: u8,
}

#[test]
fn test_field_names_are_snake_case() {
    let gen = Generator::default();
    let value: CaseConvention = gen.any(&["case"]).unwrap();

    assert_eq!(value.HTTPStatus, gen.uint64(&["case", "http_status"]) as u16);
    assert_eq!(value.r#type, gen.uint64(&["case", "type"]) as u8);
}

#[derive(Debug, PartialEq, Fill)]
struct Pair(u32, String);

#[derive(Debug, PartialEq, Fill)]
struct Marker;

#[derive(Debug, PartialEq, Fill)]
struct Wrapper<T> {
    inner: T,
    items: Vec<T>,
}

#[test]
fn test_tuple_unit_and_generic_records() {
    let gen = Generator::default();

    assert_eq!(
        gen.any::<Pair, _>(&["pair"]),
        Some(Pair(
            gen.uint64(&["pair", "0"]) as u32,
            gen.string(&["pair", "1"])
        ))
    );
    assert_eq!(gen.any::<Marker, _>(&["marker"]), Some(Marker));

    let wrapped: Wrapper<Pair> = gen.any(&["w"]).unwrap();
    assert_eq!(wrapped.inner, gen.any::<Pair, _>(&["w", "inner"]).unwrap());
    assert_eq!(wrapped.items.len(), gen.length(&["w", "items", "len"]));
}

#[derive(Debug, Fill)]
struct Links {
    home: Option<url::Url>,
    mirrors: Vec<url::Url>,
    created_at: chrono::DateTime<chrono::Utc>,
}

#[test]
fn test_opaque_fields_use_type_generators() {
    let gen = Generator::default();
    let links: Links = gen.any(&["links"]).unwrap();

    assert_eq!(links.home, gen.url(&["links", "home"]));
    assert_eq!(links.mirrors.len(), gen.length(&["links", "mirrors", "len"]));
    assert_eq!(Some(links.mirrors[0].clone()), gen.url(&["links", "mirrors", "0"]));
    assert_eq!(links.created_at, gen.time(&["links", "created_at"]));
}

#[derive(Debug, PartialEq, Fill)]
struct Site {
    home: url::Url,
    id: u32,
}

#[derive(Debug, Fill)]
struct Directory {
    main: Box<Site>,
    listed: Vec<Site>,
    pinned: [Site; 2],
}

#[test]
fn test_records_with_url_fields_are_built() {
    let (gen, errors) = collecting();

    let site: Site = gen.any(&["site"]).unwrap();
    assert_eq!(Some(site.home.clone()), gen.url(&["site", "home"]));
    assert_eq!(site.id, gen.uint64(&["site", "id"]) as u32);

    let dir: Directory = gen.any(&["dir"]).unwrap();
    assert_eq!(*dir.main, gen.any::<Site, _>(&["dir", "main"]).unwrap());
    assert_eq!(dir.listed.len(), gen.length(&["dir", "listed", "len"]));
    assert_eq!(dir.pinned[1], gen.any::<Site, _>(&["dir", "pinned", "1"]).unwrap());

    assert!(errors.lock().unwrap().is_empty());
    assert_eq!(Site::zero(), None);
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Celsius(i16);

impl Fill for Celsius {
    fn shape() -> Shape {
        Shape::Opaque("Celsius")
    }

    fn zero() -> Option<Self> {
        Some(Celsius(0))
    }
}

#[derive(Debug, Fill)]
struct Reading {
    indoor: Celsius,
    outdoor: Option<Celsius>,
}

#[test]
fn test_registered_type_generator_replaces_subtree() {
    let mut gen = Generator::default();
    gen.register_type_generator(|gen, keys| {
        Ok(Celsius((gen.uint64(keys.segments()) % 60) as i16 - 20))
    });

    let reading: Reading = gen.any(&["reading"]).unwrap();

    let expected = |path: &[&str]| Celsius((gen.uint64(path) % 60) as i16 - 20);
    assert_eq!(reading.indoor, expected(&["reading", "indoor"]));
    assert_eq!(reading.outdoor, Some(expected(&["reading", "outdoor"])));
}
