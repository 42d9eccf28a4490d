
mod presentation;
mod test_error;
