use anyhow::{Context, Result};
use centerview::application::{Session, SessionStore, SharedSession, StoredSession};
use centerview::domain::Identity;
use centerview::infrastructure::{FileSessionStore, HttpApi};
use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// One request as the stub server saw it
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[allow(dead_code)]
impl RecordedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

type Routes = HashMap<String, (u16, String)>;

/// Local HTTP server answering canned responses keyed by `"METHOD /path"`.
///
/// Every connection serves one request and is then closed.
#[allow(dead_code)]
pub struct StubServer {
    base_url: String,
    routes: Arc<Mutex<Routes>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl StubServer {
    pub fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind stub server")?;
        let addr = listener.local_addr()?;
        let routes = Arc::new(Mutex::new(Routes::new()));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let thread_routes = Arc::clone(&routes);
        let thread_requests = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                if let Err(e) = serve(stream, &thread_routes, &thread_requests) {
                    eprintln!("stub server: {e:#}");
                }
            }
        });

        Ok(Self {
            base_url: format!("http://{}/api", addr),
            routes,
            requests,
        })
    }

    pub fn api(&self) -> HttpApi {
        HttpApi::new(&self.base_url)
    }

    pub fn route(&self, method: &str, path: &str, status: u16, body: impl Into<String>) -> &Self {
        self.routes
            .lock()
            .expect("routes lock")
            .insert(format!("{} /api{}", method, path), (status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_with_method(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method)
            .collect()
    }
}

fn serve(
    stream: TcpStream,
    routes: &Mutex<Routes>,
    requests: &Mutex<Vec<RecordedRequest>>,
) -> Result<()> {
    let mut reader = BufReader::new(stream.try_clone()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut authorization = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            match name.to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "authorization" => authorization = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body)?;

    let key = format!("{} {}", method, path);
    requests.lock().expect("requests lock").push(RecordedRequest {
        method,
        path,
        authorization,
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    let (status, payload) = routes
        .lock()
        .expect("routes lock")
        .get(&key)
        .cloned()
        .unwrap_or((404, r#"{"message":"Not found"}"#.to_string()));

    let mut stream = stream;
    write!(
        stream,
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        payload.len(),
        payload
    )?;
    stream.flush()?;
    Ok(())
}

/// Session file in a private temp directory
#[allow(dead_code)]
pub struct TestSession {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestSession {
    pub fn anonymous() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("session.json");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn signed_in(token: &str, identity: &Identity) -> Result<Self> {
        let session = Self::anonymous()?;
        FileSessionStore::new(&session.path).save(&StoredSession {
            token: Some(token.to_string()),
            user: Some(identity.to_stored()),
        })?;
        Ok(session)
    }

    pub fn with_token_only(token: &str) -> Result<Self> {
        let session = Self::anonymous()?;
        FileSessionStore::new(&session.path).save(&StoredSession {
            token: Some(token.to_string()),
            user: None,
        })?;
        Ok(session)
    }

    pub fn open(&self) -> SharedSession<FileSessionStore> {
        Session::open(FileSessionStore::new(&self.path)).shared()
    }
}

#[allow(dead_code)]
pub fn user(id: i64, first_name: &str) -> Identity {
    Identity {
        id,
        first_name: Some(first_name.to_string()),
        last_name: Some("Test".to_string()),
    }
}

/// Known payloads served by the stub
#[allow(dead_code)]
pub mod payloads {
    pub const CENTER_42: &str = r#"{
        "data": {
            "id": 42,
            "name": "Najot Ta'lim",
            "image": "najot.png",
            "address": "Toshkent, Chilonzor 9",
            "phone": "+998 90 123 45 67",
            "description": "Dasturlash kurslari",
            "courses": [
                {"name": "Frontend", "description": "React", "price": 1200000},
                {"name": "Backend", "description": null, "price": "900 000 so'm"}
            ],
            "schedule": [{"course": "Frontend", "day": "Seshanba", "time": "14:00"}],
            "facilities": null
        }
    }"#;

    pub const CENTER_NULL_DATA: &str = r#"{"data": null}"#;

    pub const COMMENTS: &str = r#"{
        "data": [
            {"id": 1, "centerId": 42, "text": "Zo'r markaz", "star": 5,
             "user": {"id": 7, "firstName": "Ali", "lastName": "Valiyev"},
             "createdAt": "2024-03-05T10:15:00.000Z"},
            {"id": 2, "centerId": "42", "text": "Yaxshi", "star": 3,
             "user": {"id": 8, "firstName": "Vali", "lastName": "Aliyev"},
             "createdAt": "2024-04-01T08:00:00.000Z"},
            {"id": 3, "centerId": 17, "text": "Boshqa markaz", "star": 2,
             "user": {"id": 7, "firstName": "Ali", "lastName": "Valiyev"}},
            {"id": 4, "centerId": 42, "text": "Buzuq", "star": 4,
             "user": {"id": 7}, "createdAt": "kecha"}
        ]
    }"#;
}
