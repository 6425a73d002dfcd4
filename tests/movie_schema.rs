use serde_json::json;
use synoid_reel::schema::{
    dict, Audio, Audiogram, ClipDuration, Element, ElementRecord, Html, Image, Movie, Scene,
    Subtitles, Text, Video, Voice,
};

fn every_variant() -> Vec<Element> {
    let mut image = Image::new("https://cdn.example/bee.jpg");
    image
        .set_duration(ClipDuration::Natural)
        .set_zoom(3)
        .set_pan("left")
        .set_crop(dict(json!({"width": 640, "height": 360, "x": 0, "y": 0})));

    let mut video = Video::new("https://cdn.example/hive.mp4");
    video.set_loop(-1).set_muted(true).set_seek(1.5).set_volume(0.4);

    let mut audio = Audio::new("https://cdn.example/music.mp3");
    audio.set_fade_out(2.0).set_variable("track", "intro");

    let mut audiogram = Audiogram::new();
    audiogram.set_color("#ffcc00").set_amplitude(7.0);

    let mut text = Text::new("Busy bees");
    text.set_style("003")
        .set_settings(dict(json!({"font-size": "48px", "font-color": "#ffffff"})));

    let mut voice = Voice::new("Bees make honey.");
    voice.set_voice("en-GB-RyanNeural").set_model("azure");

    let mut subtitles = Subtitles::new();
    subtitles.set_language("en").set_settings(dict(json!({"style": "classic"})));

    vec![
        Element::from(image),
        Element::from(video),
        Element::from(audio),
        Element::from(audiogram),
        Element::from(Html::from_snippet("<h1>Bees</h1>")),
        Element::from(text),
        Element::from(voice),
        Element::from(subtitles),
    ]
}

#[test]
fn test_every_variant_survives_a_map_round_trip() {
    for element in every_variant() {
        let first = element.to_map();
        let rebuilt = Element::from_map(first.clone()).unwrap();
        assert_eq!(rebuilt, element, "{} changed while loading", element.kind());
        assert_eq!(rebuilt.to_map(), first, "{} map drifted", element.kind());
    }
}

#[test]
fn test_type_key_matches_discriminant() {
    let expected = [
        Image::TYPE,
        Video::TYPE,
        Audio::TYPE,
        Audiogram::TYPE,
        Html::TYPE,
        Text::TYPE,
        Voice::TYPE,
        Subtitles::TYPE,
    ];
    for (element, kind) in every_variant().into_iter().zip(expected) {
        let map = element.to_map();
        assert_eq!(map["type"], json!(kind));
        assert_eq!(map.keys().next().map(String::as_str), Some("type"));
    }
    assert_eq!(
        expected,
        ["image", "video", "audio", "audiogram", "html", "text", "voice", "subtitles"]
    );
}

#[test]
fn test_scene_keeps_insertion_order() {
    let mut scene = Scene::new();
    scene
        .add_element(Text::new("A"))
        .add_element(Image::new("https://cdn.example/b.jpg"))
        .add_element(Text::new("C"));

    let map = scene.to_map();
    let elements = map["elements"].as_array().unwrap();
    assert_eq!(elements.len(), 3);
    assert_eq!(elements[0]["text"], json!("A"));
    assert_eq!(elements[1]["src"], json!("https://cdn.example/b.jpg"));
    assert_eq!(elements[2]["text"], json!("C"));
}

#[test]
fn test_empty_movie_lists() {
    let map = Movie::new().to_map();
    assert_eq!(map["scenes"], json!([]));
    assert_eq!(map["elements"], json!([]));
}

#[test]
fn test_image_natural_duration_is_bit_exact() {
    let mut image = Image::new("https://cdn.example/a.jpg");
    image.set_duration(-1);
    let map = image.to_map();
    assert_eq!(map["duration"], json!(-1));
    assert_eq!(serde_json::to_string(&map["duration"]).unwrap(), "-1");

    let mut text = Text::new("fills the scene");
    text.set_duration(ClipDuration::Scene);
    assert_eq!(text.to_map()["duration"], json!(-2));
}

#[test]
fn test_full_movie_document_round_trip() {
    let mut intro = Scene::new();
    intro
        .set_duration(5.0)
        .set_comment("intro")
        .add_element(Text::new("Welcome"));
    let mut outro = Scene::new();
    outro.add_element(Video::new("https://cdn.example/end.mp4"));

    let mut movie = Movie::new();
    movie
        .set_resolution("full-hd")
        .set_quality("medium")
        .set_variable("brand", "Hive")
        .add_element(Audio::new("https://cdn.example/music.mp3"))
        .add_scene(intro)
        .add_scene(outro);

    let value = movie.to_value();
    let text = serde_json::to_string(&value).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let loaded = Movie::from_value(reparsed).unwrap();

    assert_eq!(loaded, movie);
    assert_eq!(loaded.scenes[0].comment.as_deref(), Some("intro"));
    assert_eq!(loaded.to_value()["scenes"][1]["elements"][0]["type"], json!("video"));
}

#[test]
fn test_loader_rejects_bad_documents() {
    assert!(Movie::from_value(json!([1, 2, 3])).is_err());
    assert!(Element::from_value(json!({"src": "no-type.jpg"})).is_err());
    assert!(Element::from_value(json!({"type": "component", "component": "basic/001"})).is_err());
    assert!(Image::from_map(dict(json!({"type": "video", "src": "x.mp4"}))).is_err());
}

#[test]
fn test_unknown_keys_pass_through_to_the_renderer() {
    let document = json!({
        "resolution": "custom",
        "client-data": {"campaign": "spring"},
        "scenes": [{
            "new_backend_key": 7,
            "elements": [
                {"type": "text", "text": "Hi", "transition": {"style": "fade"}}
            ]
        }]
    });

    let movie = Movie::from_value(document).unwrap();
    assert_eq!(movie.extra["client-data"], json!({"campaign": "spring"}));

    let out = movie.to_value();
    assert_eq!(out["client-data"], json!({"campaign": "spring"}));
    assert_eq!(out["scenes"][0]["new_backend_key"], json!(7));
    let text = &out["scenes"][0]["elements"][0];
    assert_eq!(text["type"], json!("text"));
    assert_eq!(text["transition"], json!({"style": "fade"}));
    assert!(!text.as_object().unwrap().contains_key("extra"));
}

#[test]
fn test_whole_floats_load_into_integer_fields() {
    let document = json!({
        "width": 1920.0,
        "height": 1080.0,
        "scenes": [{"elements": [
            {"type": "image", "src": "a.jpg", "x": 10.0, "zoom": 2.0, "z_index": 1.0},
            {"type": "video", "src": "b.mp4", "loop": -1.0}
        ]}]
    });

    let movie = Movie::from_value(document).unwrap();
    assert_eq!((movie.width, movie.height), (1920, 1080));
    let out = movie.to_value();
    assert_eq!(out["width"], json!(1920));
    assert_eq!(out["scenes"][0]["elements"][0]["x"], json!(10));
    assert_eq!(out["scenes"][0]["elements"][0]["z_index"], json!(1));
    assert_eq!(out["scenes"][0]["elements"][1]["loop"], json!(-1));

    assert!(Movie::from_value(json!({"width": 1920.5})).is_err());
}
