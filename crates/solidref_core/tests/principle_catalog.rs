use solidref_core::{
    BuildError, Corpus, EmbeddedSource, LookupTarget, NotFoundError, Principle,
    PrincipleCatalog, PrincipleId,
};

fn embedded_catalog() -> PrincipleCatalog {
    Corpus::load(&EmbeddedSource).unwrap().catalog().clone()
}

fn principle(id: PrincipleId) -> Principle {
    Principle {
        id,
        name: format!("{id} principle"),
        definition: format!("definition of {id}"),
        goal: String::new(),
        benefits: Vec::new(),
    }
}

#[test]
fn lookup_returns_each_of_the_five_principles() {
    let catalog = embedded_catalog();

    for (code, name) in [
        ("SRP", "Single Responsibility Principle"),
        ("OCP", "Open/Closed Principle"),
        ("LSP", "Liskov Substitution Principle"),
        ("ISP", "Interface Segregation Principle"),
        ("DIP", "Dependency Inversion Principle"),
    ] {
        let principle = catalog.lookup(code).unwrap();
        assert_eq!(principle.id.as_str(), code);
        assert_eq!(principle.name, name);
        assert!(!principle.definition.is_empty());
    }
}

#[test]
fn lookup_trims_and_ignores_case() {
    let catalog = embedded_catalog();
    assert_eq!(catalog.lookup("  dip ").unwrap().id, PrincipleId::Dip);
    assert_eq!(catalog.lookup("Srp").unwrap().id, PrincipleId::Srp);
}

#[test]
fn lookup_of_unknown_identifier_is_not_found() {
    let catalog = embedded_catalog();

    let err = catalog.lookup("XYZ").unwrap_err();
    assert_eq!(err, NotFoundError::principle("XYZ"));
    assert_eq!(err.target, LookupTarget::Principle);
    assert_eq!(err.to_string(), "principle not found: XYZ");

    assert!(catalog.lookup("").is_err());
    assert!(catalog.lookup("Single Responsibility Principle").is_err());
}

#[test]
fn all_lists_principles_in_canonical_order() {
    let catalog = embedded_catalog();

    let first: Vec<PrincipleId> = catalog.all().iter().map(|p| p.id).collect();
    let second: Vec<PrincipleId> = catalog.all().iter().map(|p| p.id).collect();
    assert_eq!(first, PrincipleId::ALL.to_vec());
    assert_eq!(first, second);
    assert_eq!(catalog.len(), 5);
}

#[test]
fn embedded_definitions_carry_citation_markers() {
    let catalog = embedded_catalog();
    let srp = catalog.get(PrincipleId::Srp);
    assert!(srp.definition.contains("one, and only one, reason to change"));
    assert_eq!(srp.citation_markers().into_iter().collect::<Vec<_>>(), vec![2]);
    assert_eq!(srp.benefits.len(), 3);
}

#[test]
fn catalog_build_orders_input_and_requires_all_five() {
    let reversed = PrincipleId::ALL.iter().rev().map(|id| principle(*id));
    let catalog = PrincipleCatalog::from_principles(reversed).unwrap();
    let ids: Vec<PrincipleId> = catalog.all().iter().map(|p| p.id).collect();
    assert_eq!(ids, PrincipleId::ALL.to_vec());

    let missing = PrincipleId::ALL
        .iter()
        .filter(|id| **id != PrincipleId::Isp)
        .map(|id| principle(*id));
    let err = PrincipleCatalog::from_principles(missing).unwrap_err();
    assert_eq!(err, BuildError::MissingPrinciple(PrincipleId::Isp));
}

#[test]
fn catalog_build_rejects_duplicates_and_blank_definitions() {
    let mut duplicated: Vec<Principle> =
        PrincipleId::ALL.iter().map(|id| principle(*id)).collect();
    duplicated.push(principle(PrincipleId::Ocp));
    let err = PrincipleCatalog::from_principles(duplicated).unwrap_err();
    assert_eq!(err, BuildError::DuplicatePrinciple(PrincipleId::Ocp));

    let mut blank: Vec<Principle> = PrincipleId::ALL.iter().map(|id| principle(*id)).collect();
    blank[0].definition = "   ".to_string();
    let err = PrincipleCatalog::from_principles(blank).unwrap_err();
    assert!(matches!(err, BuildError::InvalidPrinciple(_)));
}
