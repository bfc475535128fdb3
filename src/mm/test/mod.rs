//! Testes do subsistema de memória
