//! ListController behavior against the mock repository.

mod mocks;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use mocks::MockPokemonRepository;
use pokedex::config::DEFAULT_SPRITE_BASE_URL;
use pokedex::error::GENERIC_LIST_ERROR;
use pokedex::repositories::PokemonRepository;
use pokedex::{Color, Config, ListController, LoadOutcome};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

fn controller(repo: &MockPokemonRepository, page_size: usize) -> ListController {
    let config = Config {
        page_size,
        ..Config::default()
    };
    ListController::new(Arc::new(repo.clone()) as Arc<dyn PokemonRepository>, &config)
}

fn names(entries: &[pokedex::PokemonListEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
}

fn solid_png(rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, Rgba(rgba));
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    bytes.into_inner()
}

#[tokio::test]
async fn test_initial_state() {
    let repo = MockPokemonRepository::with_generated(5);
    let list = controller(&repo, 2);
    let state = list.state();

    assert!(state.items.is_empty());
    assert!(state.filtered_items.is_empty());
    assert!(!state.end_reached);
    assert!(!state.is_loading);
    assert!(!state.is_searching);
    assert_eq!(state.load_error, None);
    assert_eq!(state.current_offset, 0);
    assert_eq!(state.total_count, None);
    assert_eq!(repo.get_call_count("get_pokemon_list"), 0);
}

#[tokio::test]
async fn test_first_page_appends_entries() {
    let repo = MockPokemonRepository::with_names(&["bulbasaur", "ivysaur", "venusaur"]);
    let list = controller(&repo, 2);

    let outcome = list.load_next_page().await;
    let state = list.state();

    assert_eq!(outcome, LoadOutcome::Loaded { added: 2 });
    assert_eq!(names(&state.items), vec!["Bulbasaur", "Ivysaur"]);
    assert_eq!(state.filtered_items, state.items);
    assert_eq!(state.current_offset, 2);
    assert_eq!(state.total_count, Some(3));
    assert!(!state.end_reached);
    assert!(!state.is_loading);
    assert_eq!(repo.list_requests(), vec![(2, 0)]);
}

#[tokio::test]
async fn test_entry_number_and_image_from_url() {
    let repo = MockPokemonRepository::with_generated(35);
    let list = controller(&repo, 40);

    list.load_next_page().await;
    let state = list.state();
    let clefairy = &state.items[34];

    assert_eq!(clefairy.number, 35);
    assert_eq!(clefairy.name, "Mon35");
    assert_eq!(
        clefairy.image_url,
        format!("{}/35.png", DEFAULT_SPRITE_BASE_URL)
    );
}

#[tokio::test]
async fn test_pages_until_end_reached() {
    let repo = MockPokemonRepository::with_generated(5);
    let list = controller(&repo, 2);

    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 2 });
    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 2 });
    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 1 });

    let state = list.state();
    assert_eq!(state.items.len(), 5);
    assert!(state.end_reached);
    let numbers: Vec<u32> = state.items.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    // end_reached is sticky: no further request is made
    assert_eq!(list.load_next_page().await, LoadOutcome::Skipped);
    assert_eq!(list.load_next_page().await, LoadOutcome::Skipped);
    assert_eq!(repo.list_requests(), vec![(2, 0), (2, 2), (2, 4)]);
    assert!(list.state().end_reached);
}

#[tokio::test]
async fn test_empty_page_ends_pagination() {
    let repo = MockPokemonRepository::with_generated(3);
    repo.report_count(100);
    let list = controller(&repo, 2);

    list.load_next_page().await;
    list.load_next_page().await;
    assert!(!list.state().end_reached);

    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 0 });
    let state = list.state();
    assert!(state.end_reached);
    assert_eq!(state.items.len(), 3);
    assert_eq!(list.load_next_page().await, LoadOutcome::Skipped);
}

#[tokio::test]
async fn test_failure_leaves_entries_and_offset() {
    let repo = MockPokemonRepository::with_generated(6);
    let list = controller(&repo, 2);

    list.load_next_page().await;
    let before = list.state();

    repo.fail_next_lists(1);
    let outcome = list.load_next_page().await;
    let state = list.state();

    assert_eq!(outcome, LoadOutcome::Failed(GENERIC_LIST_ERROR.to_string()));
    assert_eq!(state.items, before.items);
    assert_eq!(state.filtered_items, before.filtered_items);
    assert_eq!(state.current_offset, 2);
    assert!(!state.end_reached);
    assert!(!state.is_loading);
    assert_eq!(state.retry_message(), Some(GENERIC_LIST_ERROR));
}

#[tokio::test]
async fn test_retry_requests_same_offset_and_clears_error() {
    let repo = MockPokemonRepository::with_generated(6);
    let list = controller(&repo, 2);

    repo.fail_next_lists(1);
    assert!(matches!(list.load_next_page().await, LoadOutcome::Failed(_)));
    assert!(list.state().load_error.is_some());

    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 2 });
    let state = list.state();

    assert_eq!(state.load_error, None);
    assert_eq!(state.retry_message(), None);
    assert_eq!(state.items.len(), 2);
    assert_eq!(repo.list_requests(), vec![(2, 0), (2, 0)]);
}

#[tokio::test]
async fn test_single_flight_while_loading() {
    let repo = MockPokemonRepository::with_generated(10);
    let gate = repo.gate_lists();
    let list = Arc::new(controller(&repo, 2));
    let mut rx = list.subscribe();

    let background = {
        let list = list.clone();
        tokio::spawn(async move { list.load_next_page().await })
    };

    rx.wait_for(|state| state.is_loading).await.unwrap();

    // A second trigger while in flight is a no-op
    assert_eq!(list.load_next_page().await, LoadOutcome::Skipped);
    assert!(!list.should_load_more(0, 2));
    assert_eq!(repo.get_call_count("get_pokemon_list"), 1);

    gate.notify_one();
    let outcome = background.await.unwrap();

    assert_eq!(outcome, LoadOutcome::Loaded { added: 2 });
    let state = list.state();
    assert!(!state.is_loading);
    assert_eq!(state.items.len(), 2);
    assert_eq!(repo.list_requests(), vec![(2, 0)]);
}

#[tokio::test]
async fn test_cancelled_load_can_be_retried() {
    let repo = MockPokemonRepository::with_generated(10);
    let gate = repo.gate_lists();
    let list = controller(&repo, 2);

    let timed_out = tokio::time::timeout(Duration::from_millis(50), list.load_next_page()).await;
    assert!(timed_out.is_err());

    let state = list.state();
    assert!(!state.is_loading);
    assert!(state.items.is_empty());
    assert_eq!(state.current_offset, 0);
    assert_eq!(state.load_error, None);
    assert!(list.should_load_more(0, 2));

    gate.notify_one();
    assert_eq!(list.load_next_page().await, LoadOutcome::Loaded { added: 2 });
    assert_eq!(repo.list_requests(), vec![(2, 0), (2, 0)]);
}

#[tokio::test]
async fn test_cancelled_load_is_published() {
    let repo = MockPokemonRepository::with_generated(10);
    let _gate = repo.gate_lists();
    let list = controller(&repo, 2);
    let mut rx = list.subscribe();

    {
        let load = list.load_next_page();
        tokio::pin!(load);
        tokio::select! {
            _ = &mut load => panic!("gated load completed"),
            _ = rx.wait_for(|state| state.is_loading) => {}
        }
    }

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_loading);
    assert_eq!(state.version, 2);
}

#[tokio::test]
async fn test_subscribers_see_loading_transitions() {
    let repo = MockPokemonRepository::with_generated(4);
    let list = controller(&repo, 2);
    let mut rx = list.subscribe();
    let start = rx.borrow_and_update().version;

    list.load_next_page().await;

    assert!(rx.has_changed().unwrap());
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_loading);
    assert_eq!(state.items.len(), 2);
    // one publish entering the load, one leaving it
    assert_eq!(state.version, start + 2);
}

#[tokio::test]
async fn test_search_filters_by_prefix() {
    let repo = MockPokemonRepository::with_names(&["charmander", "bulbasaur", "charizard"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    list.set_query("cha");
    let state = list.state();
    assert!(state.is_searching);
    assert_eq!(names(&state.filtered_items), vec!["Charmander", "Charizard"]);
    assert_eq!(state.items.len(), 3);

    list.set_query("");
    let state = list.state();
    assert!(!state.is_searching);
    assert_eq!(state.filtered_items, state.items);
}

#[tokio::test]
async fn test_search_ignores_case_and_whitespace() {
    let repo = MockPokemonRepository::with_names(&["charmander", "bulbasaur", "charizard"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    list.set_query("  CHAR ");
    assert_eq!(
        names(&list.state().filtered_items),
        vec!["Charmander", "Charizard"]
    );

    list.set_query("Bulb");
    assert_eq!(names(&list.state().filtered_items), vec!["Bulbasaur"]);

    list.set_query("zzz");
    let state = list.state();
    assert!(state.is_searching);
    assert!(state.filtered_items.is_empty());
}

#[tokio::test]
async fn test_search_never_fetches() {
    let repo = MockPokemonRepository::with_generated(50);
    let list = controller(&repo, 10);
    list.load_next_page().await;
    let before = list.state();

    list.set_query("mon4");
    list.set_query("mon");
    list.set_query("");

    let after = list.state();
    assert_eq!(repo.get_call_count("get_pokemon_list"), 1);
    assert_eq!(after.current_offset, before.current_offset);
    assert_eq!(after.end_reached, before.end_reached);
    assert_eq!(after.total_count, before.total_count);
    assert_eq!(after.items, before.items);
}

#[tokio::test]
async fn test_repeated_query_is_not_republished() {
    let repo = MockPokemonRepository::with_names(&["pikachu", "raichu"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    list.set_query("pi");
    let mut rx = list.subscribe();
    let version = rx.borrow_and_update().version;

    list.set_query("pi");
    list.set_query(" PI ");

    assert!(!rx.has_changed().unwrap());
    assert_eq!(list.state().version, version);
}

#[tokio::test]
async fn test_blank_query_counts_as_empty() {
    let repo = MockPokemonRepository::with_generated(20);
    let list = controller(&repo, 6);
    list.load_next_page().await;

    list.set_query("mon1");
    assert!(list.state().is_searching);

    list.set_query("   ");
    let state = list.state();
    assert!(!state.is_searching);
    assert_eq!(state.query, "");
    assert_eq!(state.filtered_items, state.items);
    assert!(list.should_load_more(2, 2));
}

#[tokio::test]
async fn test_empty_query_before_loading() {
    let repo = MockPokemonRepository::with_generated(3);
    let list = controller(&repo, 2);

    list.set_query("");
    let state = list.state();
    assert!(!state.is_searching);
    assert!(state.filtered_items.is_empty());
    assert_eq!(repo.get_call_count("get_pokemon_list"), 0);
}

#[tokio::test]
async fn test_page_loaded_while_searching_keeps_filter() {
    let repo =
        MockPokemonRepository::with_names(&["charmander", "bulbasaur", "ivysaur", "charizard"]);
    let list = controller(&repo, 2);
    list.load_next_page().await;

    list.set_query("cha");
    assert_eq!(names(&list.state().filtered_items), vec!["Charmander"]);

    list.load_next_page().await;
    let state = list.state();
    assert!(state.is_searching);
    assert_eq!(names(&state.filtered_items), vec!["Charmander", "Charizard"]);
    assert_eq!(state.items.len(), 4);
}

#[tokio::test]
async fn test_should_load_more_near_end() {
    let repo = MockPokemonRepository::with_generated(20);
    let list = controller(&repo, 6);
    list.load_next_page().await;

    // 6 entries in 2 columns make 3 rows
    assert!(!list.should_load_more(0, 2));
    assert!(list.should_load_more(2, 2));
    assert!(list.should_load_more(5, 2));
}

#[tokio::test]
async fn test_pagination_suspended_while_searching() {
    let repo = MockPokemonRepository::with_generated(20);
    let list = controller(&repo, 6);
    list.load_next_page().await;

    list.set_query("mon1");
    // one filtered row, so the last visible row is the end
    assert!(!list.should_load_more(0, 2));
    assert_eq!(list.on_row_rendered(0, 2).await, LoadOutcome::Skipped);
    assert_eq!(repo.get_call_count("get_pokemon_list"), 1);

    list.set_query("");
    assert_eq!(
        list.on_row_rendered(2, 2).await,
        LoadOutcome::Loaded { added: 6 }
    );
    assert_eq!(repo.get_call_count("get_pokemon_list"), 2);
}

#[tokio::test]
async fn test_on_row_rendered_after_end() {
    let repo = MockPokemonRepository::with_generated(2);
    let list = controller(&repo, 2);
    list.load_next_page().await;

    assert!(list.state().end_reached);
    assert!(!list.should_load_more(0, 2));
    assert_eq!(list.on_row_rendered(0, 2).await, LoadOutcome::Skipped);
    assert_eq!(repo.get_call_count("get_pokemon_list"), 1);
}

#[tokio::test]
async fn test_dominant_color_of_sprite() {
    let repo = MockPokemonRepository::with_names(&["charmander"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    let entry = list.state().items[0].clone();
    repo.add_sprite(&entry.image_url, solid_png([255, 0, 0, 255]));

    let color = list.calculate_dominant_color(&entry).await;
    assert_eq!(color, Color::rgb(255, 0, 0));
    assert_eq!(repo.get_call_count("get_sprite"), 1);
}

#[tokio::test]
async fn test_dominant_color_falls_back_on_missing_sprite() {
    let repo = MockPokemonRepository::with_names(&["charmander"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    let entry = list.state().items[0].clone();
    assert_eq!(list.calculate_dominant_color(&entry).await, Color::SURFACE);
}

#[tokio::test]
async fn test_dominant_color_falls_back_on_garbage() {
    let repo = MockPokemonRepository::with_names(&["charmander"]);
    let list = controller(&repo, 20);
    list.load_next_page().await;

    let entry = list.state().items[0].clone();
    repo.add_sprite(&entry.image_url, b"definitely not an image".to_vec());

    assert_eq!(list.calculate_dominant_color(&entry).await, Color::SURFACE);
}
