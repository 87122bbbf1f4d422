use festival_display::{
    config::Config,
    display::{write_json, write_plain},
    sheets::{Dataset, HttpSheetSource, SheetCache, SheetEndpoints, refresh_all, refresh_dataset},
    slideshow::{SlideDescriptor, build_view_list},
};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KIDS_CSV: &str = "\
KIDS - SARGAMELA 2025,,,,
S/No.,Name,Quran,Song,TOTAL
1,Chaliyam,3,5,8
2,Kadalundi,2,4,
";

const SENIORS_CSV: &str = "\
SENIORS - SARGAMELA 2025,,,
S/No.,Name,Speech,Total
1,Feroke Town,9,9
2,Karad,7,7
";

const SCOREBOARD_CSV: &str = "S/No.,Name,Total\n1,Chaliyam,120\n2,Keezhiyil,130.5\n";

const GENERAL_CSV: &str = "\
Key,Value
Flash News,Results of Stage 2 are out
Scroll News,\"Lunch at 1 PM
Prize distribution at 6 PM\"
Program Status,live
";

async fn mount_csv(server: &MockServer, dataset: Dataset, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{}.csv", dataset.key())))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts every sheet; category sheets other than kids and seniors are
/// header-only, so their tables load empty.
async fn mount_festival(server: &MockServer) {
    for dataset in Dataset::ALL {
        let body = match dataset.key() {
            "kids" => KIDS_CSV,
            "seniors" => SENIORS_CSV,
            "scoreboard" => SCOREBOARD_CSV,
            "general" => GENERAL_CSV,
            _ => "banner\nS/No.,Name,Total\n",
        };
        mount_csv(server, dataset, body).await;
    }
}

fn source_for(server: &MockServer) -> HttpSheetSource {
    HttpSheetSource::with_timeout(SheetEndpoints::with_base(&server.uri()), 5)
        .expect("client should build")
}

/// Test that every sheet is fetched and formatted into the cache
#[tokio::test]
async fn test_refresh_all_loads_every_sheet() {
    let server = MockServer::start().await;
    mount_festival(&server).await;

    let cache = SheetCache::new();
    let loaded = refresh_all(&source_for(&server), &cache).await;
    assert_eq!(loaded, Dataset::ALL.len());

    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.categories.len(), 5);
    assert!(snapshot.failing.is_empty());
    assert!(snapshot.loading.is_empty());

    let madrasas = snapshot.madrasas();
    assert_eq!(madrasas[0].name, "KEEZHIYIL");
    assert_eq!(madrasas[0].score, 130.5);
    assert_eq!(madrasas[1].name, "CHALIYAM");

    let general = snapshot.general.as_deref().expect("general data loaded");
    assert_eq!(general.flash_news, "Results of Stage 2 are out");
    assert_eq!(general.scroll_news, vec!["Lunch at 1 PM", "Prize distribution at 6 PM"]);

    let kids = cache.category(festival_display::Category::Kids).await;
    let kids = kids.value.expect("kids table loaded");
    assert_eq!(kids.headers, vec!["Quran", "Song"]);
    assert_eq!(kids.rows[0].category, "Chaliyam");
    assert_eq!(kids.rows[1].total, 6.0);
}

/// Test that a failing sheet only affects its own slides
#[tokio::test]
async fn test_failing_general_sheet_falls_back() {
    let server = MockServer::start().await;
    for dataset in Dataset::ALL {
        if dataset == Dataset::General {
            Mock::given(method("GET"))
                .and(path("/general.csv"))
                .respond_with(ResponseTemplate::new(500))
                .mount(&server)
                .await;
        } else {
            mount_csv(&server, dataset, "banner\nS/No.,Name,Total\n1,Chaliyam,10\n").await;
        }
    }

    let cache = SheetCache::new();
    let loaded = refresh_all(&source_for(&server), &cache).await;
    assert_eq!(loaded, Dataset::ALL.len() - 1);

    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.failing, vec![Dataset::General]);
    assert!(snapshot.general.is_none());

    let general = cache.general().await;
    assert!(general.is_error);
    assert!(!general.is_stale);

    let views = build_view_list(&snapshot, "Welcome to the festival");
    assert_eq!(views[0], SlideDescriptor::Intro);
    assert_eq!(views[1], SlideDescriptor::Flash);
    assert_eq!(views[2], SlideDescriptor::Scoreboard);
    assert_eq!(views.len(), 3 + 5);
}

/// Test that a failed refetch keeps the previous value as stale
#[tokio::test]
async fn test_failed_refetch_keeps_stale_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scoreboard.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SCOREBOARD_CSV))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/scoreboard.csv"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = source_for(&server);
    let cache = SheetCache::new();

    assert!(refresh_dataset(&source, &cache, Dataset::Scoreboard).await);
    assert!(!refresh_dataset(&source, &cache, Dataset::Scoreboard).await);

    let scoreboard = cache.scoreboard().await;
    assert!(scoreboard.is_stale);
    assert!(scoreboard.error.is_some());
    let table = scoreboard.value.expect("stale value kept");
    assert_eq!(table.rows.len(), 2);

    let snapshot = cache.snapshot().await;
    assert_eq!(snapshot.failing, vec![Dataset::Scoreboard]);
    assert_eq!(snapshot.madrasas().len(), 2);
}

/// Test the one-shot text and JSON printouts built from fetched sheets
#[tokio::test]
async fn test_printouts_from_fetched_sheets() {
    let server = MockServer::start().await;
    mount_festival(&server).await;

    let cache = SheetCache::new();
    refresh_all(&source_for(&server), &cache).await;
    let snapshot = cache.snapshot().await;

    let mut plain = Vec::new();
    write_plain(&mut plain, &snapshot, "Welcome").expect("plain output");
    let plain = String::from_utf8(plain).expect("utf-8 output");
    assert!(plain.contains("Results of Stage 2 are out"));
    assert!(plain.contains("OVERALL CHAMPIONSHIP"));
    assert!(plain.contains("KIDS"));
    assert!(plain.contains("SENIORS"));
    assert!(plain.contains("- Prize distribution at 6 PM"));
    assert!(!plain.contains("Unavailable"));

    let mut json = Vec::new();
    write_json(&mut json, &snapshot, "Welcome").expect("json output");
    let value: serde_json::Value = serde_json::from_slice(&json).expect("valid json");
    assert_eq!(value["flashNews"], "Results of Stage 2 are out");
    assert_eq!(value["madrasas"][0]["name"], "KEEZHIYIL");
    assert_eq!(value["categories"].as_array().map(Vec::len), Some(5));
}

/// Test that a config file can point the display at a mirror
#[tokio::test]
async fn test_config_file_points_at_mirror() {
    let server = MockServer::start().await;
    mount_festival(&server).await;

    let dir = tempdir().expect("temp dir");
    let config_path = dir.path().join("config.toml");
    let config = Config {
        endpoints: SheetEndpoints::with_base(&server.uri()),
        http_timeout_seconds: 5,
        ..Config::default()
    };
    config
        .save_to_path(config_path.to_str().expect("utf-8 path"))
        .await
        .expect("config saved");

    let loaded = Config::load_from_path(config_path.to_str().expect("utf-8 path"))
        .await
        .expect("config loaded");
    assert_eq!(loaded, config);

    let source = HttpSheetSource::with_timeout(loaded.endpoints.clone(), loaded.http_timeout_seconds)
        .expect("client should build");
    let cache = SheetCache::new();
    assert_eq!(refresh_all(&source, &cache).await, Dataset::ALL.len());
}
