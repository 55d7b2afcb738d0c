use async_trait::async_trait;
use pokedex::error::{RepositoryError, RepositoryResult};
use pokedex::models::{NamedResource, PokemonDetail, PokemonPage};
use pokedex::repositories::PokemonRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// In-memory Pokemon repository serving slices of a fixed name list.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPokemonRepository {
    names: Arc<Mutex<Vec<String>>>,
    reported_count: Arc<Mutex<Option<usize>>>,
    list_failures: Arc<Mutex<usize>>,
    details: Arc<Mutex<HashMap<String, PokemonDetail>>>,
    sprites: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    list_requests: Arc<Mutex<Vec<(usize, usize)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    gate: Arc<Mutex<Option<Arc<Notify>>>>,
}

#[allow(dead_code)]
impl MockPokemonRepository {
    pub fn new() -> Self {
        Self {
            names: Arc::new(Mutex::new(Vec::new())),
            reported_count: Arc::new(Mutex::new(None)),
            list_failures: Arc::new(Mutex::new(0)),
            details: Arc::new(Mutex::new(HashMap::new())),
            sprites: Arc::new(Mutex::new(HashMap::new())),
            list_requests: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    /// Serve these names, in order. Dex numbers are their 1-based positions.
    pub fn with_names(names: &[&str]) -> Self {
        let repo = Self::new();
        *repo.names.lock().unwrap() = names.iter().map(|n| n.to_string()).collect();
        repo
    }

    /// Serve `count` generated names (`mon1`, `mon2`, ...).
    pub fn with_generated(count: usize) -> Self {
        let repo = Self::new();
        *repo.names.lock().unwrap() = (1..=count).map(|i| format!("mon{}", i)).collect();
        repo
    }

    /// Report `count` as the total instead of the real number of names.
    pub fn report_count(&self, count: usize) {
        *self.reported_count.lock().unwrap() = Some(count);
    }

    /// Make the next `times` list calls fail.
    pub fn fail_next_lists(&self, times: usize) {
        *self.list_failures.lock().unwrap() = times;
    }

    /// Hold list calls until the returned handle is notified.
    pub fn gate_lists(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn add_detail(&self, detail: PokemonDetail) {
        self.details
            .lock()
            .unwrap()
            .insert(detail.name.clone(), detail);
    }

    pub fn add_sprite(&self, url: &str, bytes: Vec<u8>) {
        self.sprites.lock().unwrap().insert(url.to_string(), bytes);
    }

    pub fn list_requests(&self) -> Vec<(usize, usize)> {
        self.list_requests.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockPokemonRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PokemonRepository for MockPokemonRepository {
    async fn get_pokemon_list(&self, limit: usize, offset: usize) -> RepositoryResult<PokemonPage> {
        self.track_call("get_pokemon_list");
        self.list_requests.lock().unwrap().push((limit, offset));

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        {
            let mut failures = self.list_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(RepositoryError::ListUnavailable);
            }
        }

        let names = self.names.lock().unwrap();
        let results = names
            .iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(index, name)| NamedResource {
                name: name.clone(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", index + 1),
            })
            .collect();
        let count = self.reported_count.lock().unwrap().unwrap_or(names.len());

        Ok(PokemonPage {
            count,
            next: None,
            previous: None,
            results,
        })
    }

    async fn get_pokemon_info(&self, name: &str) -> RepositoryResult<PokemonDetail> {
        self.track_call("get_pokemon_info");

        self.details
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| RepositoryError::detail(format!("Resource not found: pokemon/{}", name)))
    }

    async fn get_sprite(&self, url: &str) -> RepositoryResult<Vec<u8>> {
        self.track_call("get_sprite");

        self.sprites
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| RepositoryError::SpriteUnavailable(format!("no sprite at {}", url)))
    }
}
