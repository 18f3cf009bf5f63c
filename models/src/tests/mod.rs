mod changeset;
mod document;
mod user;
