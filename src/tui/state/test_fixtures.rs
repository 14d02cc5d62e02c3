//! Shared store fixtures for controller tests.

use crate::model::Id;
use crate::ops::{Actions, Command, NewEntity, Store};

/// Ids of everything [`sample_store`] creates
pub struct Sample {
    pub work: Id,
    pub home: Id,
    pub site: Id,
    pub docs: Id,
    pub garden: Id,
    pub header: Id,
    pub footer: Id,
    pub call_bank: Id,
    pub buy_stamps: Id,
    pub podcast: Id,
}

pub fn track(store: &mut Store, name: &str) -> Id {
    store
        .execute(Command::Create(NewEntity::Track {
            name: name.into(),
            description: String::new(),
        }))
        .data
        .unwrap()
}

pub fn project(store: &mut Store, track_id: Id, name: &str) -> Id {
    store
        .execute(Command::Create(NewEntity::Project {
            track_id,
            name: name.into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        }))
        .data
        .unwrap()
}

pub fn todo(store: &mut Store, project_id: Id, name: &str, total_stages: u32) -> Id {
    store
        .execute(Command::Create(NewEntity::Todo {
            project_id,
            name: name.into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
            current_stage: 0,
            total_stages,
        }))
        .data
        .unwrap()
}

pub fn box_todo(store: &mut Store, name: &str) -> Id {
    store
        .execute(Command::Create(NewEntity::BoxTodo {
            name: name.into(),
            description: String::new(),
            deadline: None,
            importance: 0,
            urgency: 0,
        }))
        .data
        .unwrap()
}

pub fn idea(store: &mut Store, name: &str) -> Id {
    store
        .execute(Command::Create(NewEntity::Idea {
            name: name.into(),
            description: String::new(),
            importance: 0,
        }))
        .data
        .unwrap()
}

/// Work{Site{Header(3 stages), Footer}, Docs}, Home{Garden}, two box todos, one idea
pub fn sample_store() -> (Store, Sample) {
    let mut store = Store::in_memory();
    let work = track(&mut store, "Work");
    let home = track(&mut store, "Home");
    let site = project(&mut store, work, "Site");
    let docs = project(&mut store, work, "Docs");
    let garden = project(&mut store, home, "Garden");
    let header = todo(&mut store, site, "Header", 3);
    let footer = todo(&mut store, site, "Footer", 1);
    let call_bank = box_todo(&mut store, "Call bank");
    let buy_stamps = box_todo(&mut store, "Buy stamps");
    let podcast = idea(&mut store, "Podcast");
    (
        store,
        Sample {
            work,
            home,
            site,
            docs,
            garden,
            header,
            footer,
            call_bank,
            buy_stamps,
            podcast,
        },
    )
}
