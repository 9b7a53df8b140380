use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use msgcore::client::http::Http;
use msgcore::client::store::MemoryStore;
use msgview::config::Config;
use msgview::utils::ErrorWithCauses;
use msgview::{Host, Session, USER_AGENT};

fn load_store(path: &Path) -> Result<Rc<MemoryStore>, msgcore::Error> {
    let json = fs::read_to_string(path)?;
    MemoryStore::from_json(&json)
}

fn main() -> ExitCode {
    env_logger::init();

    let config = Config::load();
    if !Config::exists() {
        config.save();
    }

    let Some(path) = env::args_os().nth(1).map(PathBuf::from).or_else(|| config.snapshot.clone()) else {
        eprintln!("usage: msgview <snapshot.json>");
        return ExitCode::FAILURE;
    };

    let store = match load_store(&path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("could not load {}: {}", path.display(), ErrorWithCauses(e));
            return ExitCode::FAILURE;
        }
    };

    if let Some(user) = config.acting_user {
        store.set_current_user(Some(user));
    }

    let mut http = Http::new(config.api_base.clone(), USER_AGENT.to_string());
    if let Ok(token) = env::var("MSGVIEW_TOKEN") {
        http = http.with_token(token);
    }

    let session = Session::new(Host::from_store(store.clone(), Rc::new(http)));
    for record in store.all_messages() {
        let message = session.message(record);
        let flag = match message.can_delete() {
            true => "*",
            false => " ",
        };
        println!("{flag} {message}");
    }

    log::debug!("{session:?}");
    ExitCode::SUCCESS
}
