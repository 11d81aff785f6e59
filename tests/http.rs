use axum::{extract::Path, routing::get, Json, Router};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Prayer {
    name: String,
    time: String,
    completed: bool,
}

#[derive(Debug, Deserialize)]
struct DailyRecord {
    date: String,
    prayers: Vec<Prayer>,
}

#[derive(Debug, Deserialize)]
struct Counter {
    id: u64,
    name: String,
    count: u64,
}

#[derive(Debug, Deserialize)]
struct Countdown {
    phase: String,
    label: String,
    remaining: String,
}

#[derive(Debug, Deserialize)]
struct Recitation {
    section_index: u8,
    amount: String,
}

#[derive(Debug, Deserialize)]
struct Ayah {
    text: String,
    number_in_surah: u32,
}

#[derive(Debug, Deserialize)]
struct Juz {
    juz: u8,
    ayahs: Vec<Ayah>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

// Stands in for both upstream APIs; lives on its own runtime so it outlives any single test.
static UPSTREAM: Lazy<String> = Lazy::new(|| {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind upstream port");
    let port = listener.local_addr().unwrap().port();
    listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("upstream runtime");
        runtime.block_on(async move {
            let app = Router::new()
                .route("/timingsByCity", get(fake_timings))
                .route("/juz/:juz/quran-uthmani", get(fake_juz));
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    format!("http://127.0.0.1:{port}")
});

async fn fake_timings() -> Json<serde_json::Value> {
    Json(json!({
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {
                "Fajr": "05:50", "Sunrise": "07:05", "Dhuhr": "13:30",
                "Asr": "16:45", "Sunset": "18:25", "Maghrib": "18:25", "Isha": "19:50"
            }
        }
    }))
}

async fn fake_juz(Path(juz): Path<u8>) -> Json<serde_json::Value> {
    Json(json!({
        "code": 200,
        "data": {
            "number": juz,
            "ayahs": [
                { "number": 1, "text": "first", "numberInSurah": 1 },
                { "number": 2, "text": "second", "numberInSurah": 2 }
            ]
        }
    }))
}

#[cfg(unix)]
mod cleanup {
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("ramazan_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/counters")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let upstream = UPSTREAM.clone();
    let child = Command::new(env!("CARGO_BIN_EXE_ramazan_companion"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("TIMING_API_BASE", &upstream)
        .env("SCRIPTURE_API_BASE", &upstream)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_prayers_toggle_and_persist_within_day() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let record: DailyRecord = client
        .get(format!("{}/api/prayers", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = record.prayers.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["Fajr", "Dhuhr", "Asr", "Maghrib", "Isha"]);
    assert_eq!(record.prayers[1].time, "13:30");
    assert_eq!(record.date.len(), 10);
    let before = record.prayers[2].completed;

    let response = client
        .post(format!("{}/api/prayers/Asr/toggle", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let again: DailyRecord = client
        .get(format!("{}/api/prayers", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(again.prayers[2].completed, !before);
    assert_eq!(again.date, record.date);
}

#[tokio::test]
async fn http_countdown_reports_a_phase() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    client
        .get(format!("{}/api/prayers", server.base_url))
        .send()
        .await
        .unwrap();
    let countdown: Countdown = client
        .get(format!("{}/api/countdown", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let expected_label = match countdown.phase.as_str() {
        "until_pre_dawn" => "Sehr in",
        "until_sunset" => "Iftar in",
        "until_next_pre_dawn" => "Next Sehr in",
        other => panic!("unexpected phase {other}"),
    };
    assert_eq!(countdown.label, expected_label);
    assert_eq!(countdown.remaining.len(), 8);
}

#[tokio::test]
async fn http_counters_keep_last_one() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let counters: Vec<Counter> = client
        .post(format!("{}/api/counters", server.base_url))
        .json(&json!({ "name": "Astaghfirullah" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let added = counters.last().unwrap();
    assert_eq!(added.name, "Astaghfirullah");

    let bumped: Counter = client
        .post(format!("{}/api/counters/{}/increment", server.base_url, added.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(bumped.count, 1);

    let blank: Vec<Counter> = client
        .post(format!("{}/api/counters", server.base_url))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(blank.len(), counters.len());

    let mut remaining = blank;
    while remaining.len() > 1 {
        let id = remaining[0].id;
        remaining = client
            .delete(format!("{}/api/counters/{id}", server.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
    }
    let last_id = remaining[0].id;
    let after: Vec<Counter> = client
        .delete(format!("{}/api/counters/{last_id}", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].id, last_id);
}

#[tokio::test]
async fn http_recitations_prepend_and_quran_loads() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let records: Vec<Recitation> = client
        .post(format!("{}/api/recitations", server.base_url))
        .json(&json!({ "section_index": 7, "amount": "5 pages" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(records[0].section_index, 7);
    assert_eq!(records[0].amount, "5 pages");

    let rejected = client
        .post(format!("{}/api/recitations", server.base_url))
        .json(&json!({ "section_index": 31, "amount": "1 page" }))
        .send()
        .await
        .unwrap();
    assert_eq!(rejected.status(), reqwest::StatusCode::BAD_REQUEST);

    let juz: Juz = client
        .get(format!("{}/api/quran/7", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(juz.juz, 7);
    assert_eq!(juz.ayahs.len(), 2);
    assert_eq!(juz.ayahs[0].text, "first");
    assert_eq!(juz.ayahs[1].number_in_surah, 2);
}
