mod test_evaluator;
