use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const RATINGS_PATH: &str = r"^/v2/ratings/namespaces/[^/]+/names/[^/]+/identifiertypes/(maven|npm)/identifiers$";
pub const DEFINITIONS_PATH: &str = r"^/v2/ratings/definitions/[^/]+$";

/// Rating service stand-in backed by a `wiremock` server
///
/// The runtime is owned here so the server stays reachable while a child
/// process talks to it. `server` is declared first so pending expectations
/// are verified before the runtime shuts down.
pub struct RatingServiceStub {
    server: MockServer,
    runtime: Runtime,
}

/// Answers `/definitions/{id}` with a definition generated from the id
struct GeneratedDefinition;

impl Respond for GeneratedDefinition {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request.url.path().rsplit('/').next().unwrap_or_default();
        ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Uuid": id,
            "Name": format!("Model {id}"),
            "Details": format!("How {id} is rated"),
            "ModelFunctionVersion": "1",
        }))
    }
}

impl RatingServiceStub {
    /// Server with no mocks mounted; every request gets a 404
    pub fn empty() -> Self {
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Server answering every rating query with `ratings_body` and every
    /// definition lookup with a generated definition
    pub fn start(ratings_body: &str) -> Self {
        let stub = Self::empty();
        stub.mount(
            Mock::given(method("POST"))
                .and(path_regex(RATINGS_PATH))
                .and(header("content-type", "application/json"))
                .and(header("accept", "application/json"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_raw(ratings_body, "application/json"),
                ),
        );
        stub.mount_definitions();
        stub
    }

    pub fn mount_definitions(&self) {
        self.mount(
            Mock::given(method("GET"))
                .and(path_regex(DEFINITIONS_PATH))
                .respond_with(GeneratedDefinition),
        );
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    pub fn received_requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    pub fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }
}
