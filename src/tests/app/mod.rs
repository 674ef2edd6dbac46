mod signup_flow_tests;
