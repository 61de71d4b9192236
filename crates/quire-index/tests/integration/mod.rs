mod build_and_query;
mod search;
