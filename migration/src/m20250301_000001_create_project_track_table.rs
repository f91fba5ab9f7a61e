use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Dates are kept as text: the hosted table stores whatever the form widget emits.
        manager
            .create_table(
                Table::create()
                    .table(ProjectTrack::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProjectTrack::ProjectNo)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProjectTrack::EntryDate).text())
                    .col(ColumnDef::new(ProjectTrack::Client).text())
                    .col(ColumnDef::new(ProjectTrack::ProjectName).text())
                    .col(ColumnDef::new(ProjectTrack::Category).text())
                    .col(ColumnDef::new(ProjectTrack::ScannedBy).text())
                    .col(ColumnDef::new(ProjectTrack::TargetDeliveryDate).text())
                    .col(ColumnDef::new(ProjectTrack::ActualDeliveryDate).text())
                    .col(ColumnDef::new(ProjectTrack::Description).text())
                    .col(ColumnDef::new(ProjectTrack::Levels).text())
                    .col(ColumnDef::new(ProjectTrack::Dwg).text())
                    .col(ColumnDef::new(ProjectTrack::Template).text())
                    .col(ColumnDef::new(ProjectTrack::RevitVersion).text())
                    .col(ColumnDef::new(ProjectTrack::ArchEmd).text())
                    .col(ColumnDef::new(ProjectTrack::GoogleEarthLink).text())
                    .col(ColumnDef::new(ProjectTrack::MepEmdTier).text())
                    .col(ColumnDef::new(ProjectTrack::Comments).text())
                    .col(ColumnDef::new(ProjectTrack::FileSharing).text())
                    .col(ColumnDef::new(ProjectTrack::ScanningDate).text())
                    .col(ColumnDef::new(ProjectTrack::Pdf).text())
                    .col(ColumnDef::new(ProjectTrack::Attachments).text())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProjectTrack::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ProjectTrack {
    Table,
    ProjectNo,
    EntryDate,
    Client,
    ProjectName,
    Category,
    ScannedBy,
    TargetDeliveryDate,
    ActualDeliveryDate,
    Description,
    Levels,
    Dwg,
    Template,
    RevitVersion,
    ArchEmd,
    GoogleEarthLink,
    MepEmdTier,
    Comments,
    FileSharing,
    ScanningDate,
    Pdf,
    Attachments,
}
