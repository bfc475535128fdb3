//! Testes de Sincronização
