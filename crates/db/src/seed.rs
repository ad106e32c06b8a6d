//! Demo catalog loaded at startup when `store.seed_demo_data` is set.

use crate::memory::MemoryStore;
use crate::models::{BookInstanceStatus, NewBookInstance, NewGenre};
use crate::store::{CatalogStore, StoreResult};

/// Load a small fixed catalog: three genres, two authors, three books and a
/// handful of copies.
pub async fn demo(store: &MemoryStore) -> StoreResult<()> {
    let fantasy = store
        .insert_genre(NewGenre {
            name: "Fantasy".to_string(),
        })
        .await?;
    let science_fiction = store
        .insert_genre(NewGenre {
            name: "Science Fiction".to_string(),
        })
        .await?;
    store
        .insert_genre(NewGenre {
            name: "Poetry".to_string(),
        })
        .await?;

    let rothfuss = store.insert_author("Patrick", "Rothfuss").await?;
    let asimov = store.insert_author("Isaac", "Asimov").await?;

    let wind = store
        .insert_book(
            "The Name of the Wind",
            "I have stolen princesses back from sleeping barrow kings.",
            "9781473211896",
            rothfuss.id,
            vec![fantasy.id],
        )
        .await?;
    let fear = store
        .insert_book(
            "The Wise Man's Fear",
            "Picking up the tale of Kvothe Kingkiller once again.",
            "9788401352836",
            rothfuss.id,
            vec![fantasy.id],
        )
        .await?;
    let robots = store
        .insert_book(
            "The Caves of Steel",
            "A detective and a robot partner investigate a murder.",
            "9780553293401",
            asimov.id,
            vec![science_fiction.id],
        )
        .await?;

    let copies = [
        (wind.id, "London Gollancz, 2014.", BookInstanceStatus::Available),
        (wind.id, "Gollancz, 2011.", BookInstanceStatus::Loaned),
        (fear.id, "Gollancz, 2011.", BookInstanceStatus::Maintenance),
        (robots.id, "Bantam Spectra, 1991.", BookInstanceStatus::Available),
    ];
    for (book, imprint, status) in copies {
        store
            .insert_book_instance(NewBookInstance {
                book,
                imprint: imprint.to_string(),
                status,
                due_back: None,
            })
            .await?;
    }

    tracing::info!(target: "catalog-db", "demo catalog seeded");
    Ok(())
}
