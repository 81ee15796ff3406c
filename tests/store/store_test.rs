#[cfg(test)]
mod tests {
    use databox::model::DataBox;
    use databox::setup;
    use databox::store::{DataBoxStore, StoreError};

    #[test]
    fn test_install_creates_the_folder() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();
        assert!(store.root().is_dir());
        assert_eq!(store.root(), setup::databoxes_folder(root.path()));
    }

    #[test]
    fn test_install_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();
        store.save(&DataBox::new("kept", "Kept")).unwrap();

        // a second install leaves existing definitions alone
        let store = setup::install(root.path()).unwrap();
        assert_eq!(store.list().unwrap(), vec!["kept"]);
    }

    #[test]
    fn test_uninstall_keeps_data() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();
        store.save(&DataBox::new("kept", "Kept")).unwrap();

        setup::uninstall(root.path());
        assert!(setup::databoxes_folder(root.path()).is_dir());
    }

    #[test]
    fn test_open_missing_folder() {
        let result = DataBoxStore::open("/nonexistent/databoxes");
        assert!(matches!(result, Err(StoreError::FolderNotFound(_))));
    }

    #[test]
    fn test_create_and_get() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();

        let databox = DataBox::new("published", "Published Samples");
        store.create(&databox).unwrap();

        let loaded = store.get("published").unwrap();
        assert_eq!(loaded, databox);

        // create refuses to overwrite
        assert!(matches!(
            store.create(&databox),
            Err(StoreError::AlreadyExists(_))
        ));
        // save overwrites
        store.save(&databox).unwrap();
    }

    #[test]
    fn test_list_and_load_all_sorted() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();
        store.create(&DataBox::new("zeta", "Z")).unwrap();
        store.create(&DataBox::new("alpha", "A")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "zeta"]);
        let boxes = store.load_all().unwrap();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].id, "alpha");
    }

    #[test]
    fn test_delete() {
        let root = tempfile::tempdir().unwrap();
        let store = setup::install(root.path()).unwrap();
        store.create(&DataBox::new("gone", "Gone")).unwrap();
        store.delete("gone").unwrap();
        assert!(matches!(
            store.get("gone"),
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("gone"),
            Err(StoreError::NotFound(_))
        ));
    }
}
