extern crate bookshelf;

use std::env;

use log::info;

use bookshelf::prefs::SessionStore;
use bookshelf::{BookRepository, Config, HttpCatalog, SearchController, SearchView};

const USAGE: &str = "usage: bookshelf <query...> | bookshelf --id <volume id>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    let args = env::args().skip(1).collect::<Vec<_>>();

    let session = SessionStore::open(&config.prefs_dir).await?;
    if session.is_first_time().get() {
        info!("first launch, prefs in {}", config.prefs_dir.display());
        session.mark_launched().await?;
    }

    let repository = BookRepository::new(HttpCatalog::new(&config)?);

    match args.as_slice() {
        [flag, id] if flag == "--id" => {
            let r = repository.get_book_info(id).await;
            if let Some(err) = r.error {
                return Err(err.into());
            }

            let book = r.data.unwrap_or_default();
            println!("{} ({})", book.title, book.book_id);
            println!("by {}", book.authors.join(", "));
            println!("{} pages, published {}", book.page_count, book.published_date);
            println!("{}", book.description);
        }
        [] => println!("{}", USAGE),
        words => {
            let controller = SearchController::new(repository);
            controller.search(&words.join(" ")).await;

            match controller.state().view() {
                SearchView::Results(books) => {
                    for book in books {
                        println!("{}\t{}\t{}", book.book_id, book.title, book.authors.join(", "));
                    }
                }
                SearchView::Empty => println!("No books found"),
                SearchView::Failed(message) => anyhow::bail!(message),
                SearchView::Idle => println!("{}", USAGE),
                SearchView::Loading => {}
            }
        }
    }

    Ok(())
}
