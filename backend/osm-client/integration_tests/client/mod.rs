mod changesets;
mod element;
mod history;
mod map;
mod user;
