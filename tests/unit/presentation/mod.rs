mod test_pagination;
